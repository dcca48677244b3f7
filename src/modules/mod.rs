pub mod addresses;
pub mod auth;
pub mod carrier_services;
pub mod carriers;
pub mod contacts;
pub mod order_classes;
pub mod order_lines;
pub mod order_statuses;
pub mod order_types;
pub mod orders;
pub mod projects;
pub mod warehouses;
