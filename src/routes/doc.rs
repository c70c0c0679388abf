use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::OrderStatus,
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{CartLine, CartMutation, CartView, UpdateQuantityRequest},
        content::{
            ContactRequest, CreateFaqRequest, CreateGalleryImageRequest, CreateOfferRequest,
            FaqList, GalleryPage, OfferList, ReservationList, ReservationRequest,
            SubscribeRequest, SubscribeResponse,
        },
        feedback::{FeedbackBoard, SubmitFeedbackRequest},
        menu::{CreateMenuItemRequest, MenuPage, UpdateMenuItemRequest},
        orders::{OrderList, OrderView, PlaceOrderRequest, UpdateOrderStatusRequest},
    },
    models::{
        ContactMessage, Faq, Feedback, GalleryImage, MenuItem, Order, OrderItem, Reservation,
        SpecialOffer, User,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, content, feedback, health, menu, orders, params},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        menu::browse,
        cart::view_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        orders::checkout,
        orders::place_order,
        orders::confirmation,
        orders::track,
        orders::my_orders,
        feedback::submit,
        feedback::board,
        content::subscribe,
        content::contact,
        content::reservation,
        content::my_reservations,
        content::offers,
        content::faq,
        content::gallery,
        auth::login,
        auth::register,
        admin::list_orders,
        admin::get_order,
        admin::update_order_status,
        admin::create_menu_item,
        admin::update_menu_item,
        admin::delete_menu_item,
        admin::create_offer,
        admin::create_faq,
        admin::create_gallery_image
    ),
    components(
        schemas(
            User,
            MenuItem,
            Order,
            OrderItem,
            OrderStatus,
            Feedback,
            SpecialOffer,
            Faq,
            GalleryImage,
            Reservation,
            ContactMessage,
            MenuPage,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            CartLine,
            CartView,
            CartMutation,
            UpdateQuantityRequest,
            PlaceOrderRequest,
            OrderView,
            OrderList,
            UpdateOrderStatusRequest,
            SubmitFeedbackRequest,
            FeedbackBoard,
            SubscribeRequest,
            SubscribeResponse,
            ContactRequest,
            ReservationRequest,
            CreateOfferRequest,
            CreateFaqRequest,
            CreateGalleryImageRequest,
            OfferList,
            FaqList,
            ReservationList,
            GalleryPage,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            params::Pagination,
            params::MenuQuery,
            params::MenuSort,
            params::OrderListQuery,
            params::SortOrder,
            health::HealthData,
            Meta,
            ApiResponse<MenuPage>,
            ApiResponse<CartView>,
            ApiResponse<OrderView>,
            ApiResponse<OrderList>,
            ApiResponse<FeedbackBoard>,
            ApiResponse<Order>,
            ApiResponse<MenuItem>,
            ApiResponse<User>,
            ApiResponse<LoginResponse>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Menu", description = "Public coffee menu"),
        (name = "Cart", description = "Session cart endpoints"),
        (name = "Orders", description = "Checkout and order tracking"),
        (name = "Feedback", description = "Order feedback and review board"),
        (name = "Content", description = "Offers, FAQ, gallery, and storefront forms"),
        (name = "Auth", description = "Staff authentication"),
        (name = "Admin", description = "Staff-only management endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
