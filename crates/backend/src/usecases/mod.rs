pub mod u001_product_page;
