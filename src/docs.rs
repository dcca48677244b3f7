use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use orderdesk_auth::AuthenticatedUser;
use orderdesk_models::{
    AddContactDto, Address, AuthStatusResponse, Carrier, CarrierService, ClearOrderLinesResponse,
    Contact, CreateAddressDto, CreateCarrierDto, CreateCarrierServiceDto, CreateContactDto,
    CreateOrderClassDto, CreateOrderDto, CreateOrderLineDto, CreateOrderStatusDto,
    CreateOrderTypeDto, CreateWarehouseDto, LoginRequest, LoginResponse, MessageResponse, Order,
    OrderClass, OrderExportResponse, OrderLine, OrderStatus, OrderType, Project,
    RefreshTokenRequest, RefreshTokenResponse, UpdateAddressDto, UpdateCarrierDto,
    UpdateCarrierServiceDto, UpdateContactDto, UpdateOrderClassDto, UpdateOrderDto,
    UpdateOrderLineDto, UpdateOrderStatusDto, UpdateOrderTypeDto, UpdateWarehouseDto, Warehouse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::auth_status,
        crate::modules::projects::controller::list_projects,
        crate::modules::projects::controller::get_project,
        crate::modules::projects::controller::add_contact,
        crate::modules::addresses::controller::list_addresses,
        crate::modules::addresses::controller::get_address,
        crate::modules::addresses::controller::create_address,
        crate::modules::addresses::controller::update_address,
        crate::modules::addresses::controller::delete_address,
        crate::modules::contacts::controller::list_contacts,
        crate::modules::contacts::controller::get_contact,
        crate::modules::contacts::controller::create_contact,
        crate::modules::contacts::controller::update_contact,
        crate::modules::contacts::controller::delete_contact,
        crate::modules::warehouses::controller::list_warehouses,
        crate::modules::warehouses::controller::get_warehouse,
        crate::modules::warehouses::controller::create_warehouse,
        crate::modules::warehouses::controller::update_warehouse,
        crate::modules::warehouses::controller::delete_warehouse,
        crate::modules::carriers::controller::list_carriers,
        crate::modules::carriers::controller::get_carrier,
        crate::modules::carriers::controller::create_carrier,
        crate::modules::carriers::controller::update_carrier,
        crate::modules::carriers::controller::delete_carrier,
        crate::modules::carrier_services::controller::list_carrier_services,
        crate::modules::carrier_services::controller::get_carrier_service,
        crate::modules::carrier_services::controller::create_carrier_service,
        crate::modules::carrier_services::controller::update_carrier_service,
        crate::modules::carrier_services::controller::delete_carrier_service,
        crate::modules::orders::controller::list_orders,
        crate::modules::orders::controller::get_order,
        crate::modules::orders::controller::create_order,
        crate::modules::orders::controller::update_order,
        crate::modules::orders::controller::delete_order,
        crate::modules::orders::controller::export_order,
        crate::modules::order_lines::controller::list_order_lines,
        crate::modules::order_lines::controller::list_lines_for_order,
        crate::modules::order_lines::controller::get_order_line,
        crate::modules::order_lines::controller::create_order_line,
        crate::modules::order_lines::controller::update_order_line,
        crate::modules::order_lines::controller::delete_order_line,
        crate::modules::order_lines::controller::clear_order_lines,
        crate::modules::order_types::controller::list_order_types,
        crate::modules::order_types::controller::get_order_type,
        crate::modules::order_types::controller::create_order_type,
        crate::modules::order_types::controller::update_order_type,
        crate::modules::order_types::controller::delete_order_type,
        crate::modules::order_classes::controller::list_order_classes,
        crate::modules::order_classes::controller::get_order_class,
        crate::modules::order_classes::controller::create_order_class,
        crate::modules::order_classes::controller::update_order_class,
        crate::modules::order_classes::controller::delete_order_class,
        crate::modules::order_statuses::controller::list_order_statuses,
        crate::modules::order_statuses::controller::get_order_status,
        crate::modules::order_statuses::controller::create_order_status,
        crate::modules::order_statuses::controller::update_order_status,
        crate::modules::order_statuses::controller::delete_order_status,
    ),
    components(
        schemas(
            AuthenticatedUser,
            LoginRequest,
            LoginResponse,
            RefreshTokenRequest,
            RefreshTokenResponse,
            AuthStatusResponse,
            MessageResponse,
            Project,
            AddContactDto,
            Address,
            CreateAddressDto,
            UpdateAddressDto,
            Contact,
            CreateContactDto,
            UpdateContactDto,
            Warehouse,
            CreateWarehouseDto,
            UpdateWarehouseDto,
            Carrier,
            CreateCarrierDto,
            UpdateCarrierDto,
            CarrierService,
            CreateCarrierServiceDto,
            UpdateCarrierServiceDto,
            Order,
            CreateOrderDto,
            UpdateOrderDto,
            OrderExportResponse,
            OrderLine,
            CreateOrderLineDto,
            UpdateOrderLineDto,
            ClearOrderLinesResponse,
            OrderType,
            CreateOrderTypeDto,
            UpdateOrderTypeDto,
            OrderClass,
            CreateOrderClassDto,
            UpdateOrderClassDto,
            OrderStatus,
            CreateOrderStatusDto,
            UpdateOrderStatusDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, token refresh and session status"),
        (name = "Projects", description = "Projects the caller is a member of"),
        (name = "Addresses", description = "Shared address book"),
        (name = "Contacts", description = "Shared contacts"),
        (name = "Warehouses", description = "Warehouses, scoped by project"),
        (name = "Carriers", description = "Carriers, scoped by project"),
        (name = "Carrier Services", description = "Service levels offered by carriers"),
        (name = "Orders", description = "Orders, scoped by project, with CSV export"),
        (name = "Order Lines", description = "Lines of visible orders"),
        (name = "Order Types", description = "Order type catalogue"),
        (name = "Order Classes", description = "Order class catalogue"),
        (name = "Order Statuses", description = "Order status catalogue"),
    ),
    info(
        title = "OrderDesk API",
        version = "0.1.0",
        description = "Multi-tenant order management. Every project-scoped list is filtered to the caller's project memberships; anonymous callers get empty lists."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("access_token"))),
            );
        }
    }
}
