pub mod sales_service;
