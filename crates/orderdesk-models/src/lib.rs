//! # OrderDesk Models
//!
//! Database entities and request/response DTOs.
//!
//! Foreign keys serialize under the relation name (`project`, `warehouse`,
//! `order_type`, ...) and map to `<name>_id` columns.
//!
//! - [`auth`]: Login, refresh and session status bodies
//! - [`users`]: User accounts
//! - [`projects`]: Projects and contact links
//! - [`addresses`], [`contacts`]: Shared reference data
//! - [`warehouses`], [`carriers`]: Project-scoped logistics resources
//! - [`classification`]: Order types, classes and statuses
//! - [`orders`]: Orders, order lines and CSV export rows

pub mod addresses;
pub mod auth;
pub mod carriers;
pub mod classification;
pub mod common;
pub mod contacts;
pub mod orders;
pub mod projects;
pub mod users;
pub mod warehouses;

pub use addresses::{Address, CreateAddressDto, UpdateAddressDto};
pub use auth::{
    AuthStatusResponse, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
};
pub use carriers::{
    Carrier, CarrierService, CreateCarrierDto, CreateCarrierServiceDto, UpdateCarrierDto,
    UpdateCarrierServiceDto,
};
pub use classification::{
    CreateOrderClassDto, CreateOrderStatusDto, CreateOrderTypeDto, OrderClass, OrderStatus,
    OrderType, UpdateOrderClassDto, UpdateOrderStatusDto, UpdateOrderTypeDto,
};
pub use common::MessageResponse;
pub use contacts::{Contact, CreateContactDto, UpdateContactDto};
pub use orders::{
    ClearOrderLinesResponse, CreateOrderDto, CreateOrderLineDto, DEFAULT_ORDER_STATUS_LOOKUP,
    Order, OrderExportResponse, OrderExportRow, OrderLine, UpdateOrderDto, UpdateOrderLineDto,
};
pub use projects::{AddContactDto, CreateProjectDto, Project};
pub use users::{CreateUserDto, User};
pub use warehouses::{CreateWarehouseDto, UpdateWarehouseDto, Warehouse};
