use utoipa::OpenApi;

use crate::handlers::{accounts, admin, bookings, cart, feedback, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salon Service API",
        version = "0.1.0",
        description = "Customer accounts, shop, bookings and staff moderation for a hair salon"
    ),
    paths(
        accounts::signup,
        accounts::verify_email,
        accounts::login,
        accounts::get_profile,
        accounts::update_profile,
        accounts::change_password,
        accounts::dashboard,
        feedback::submit_feedback,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::decrease_quantity,
        cart::increase_quantity,
        cart::clear_cart,
        cart::get_cart,
        cart::list_orders,
        cart::get_wishlist,
        cart::add_to_wishlist,
        cart::remove_from_wishlist,
        cart::checkout,
        cart::pay,
        bookings::book_service,
        bookings::current_booking,
        bookings::pay_booking,
        bookings::book_appointment,
        bookings::list_apprenticeships,
        admin::create_manager,
        admin::list_managers,
        admin::delete_manager,
        admin::list_manager_profiles,
        admin::approve_managers,
        admin::archive_managers,
        admin::activate_profiles,
        admin::deactivate_profiles,
        admin::list_manager_feedback,
        admin::delete_manager_feedback,
    ),
    components(
        schemas(
            MessageResponse,
            accounts::SignupRequest,
            accounts::SignupResponse,
            accounts::LoginRequest,
            accounts::LoginResponse,
            accounts::CustomerResponse,
            accounts::ProfileRequest,
            accounts::ProfileResponse,
            accounts::PasswordChangeRequest,
            accounts::DashboardResponse,
            feedback::FeedbackRequest,
            feedback::FeedbackResponse,
            feedback::FeedbackSentResponse,
            cart::OrderResponse,
            cart::CartItemResponse,
            cart::CartResponse,
            cart::AdjustmentResponse,
            cart::CheckoutResponse,
            cart::OrdersResponse,
            cart::WishlistItemResponse,
            cart::WishlistResponse,
            cart::PaymentRequest,
            cart::PaymentResponse,
            cart::PaidResponse,
            bookings::ServiceResponse,
            bookings::BookingResponse,
            bookings::CurrentBookingResponse,
            bookings::BookingPaymentResponse,
            bookings::BookingPaidResponse,
            bookings::AppointmentRequest,
            bookings::AppointmentResponse,
            bookings::AppointmentSetResponse,
            bookings::ApprenticeshipResponse,
            bookings::ApprenticeshipsResponse,
            admin::ManagerRequest,
            admin::ManagerResponse,
            admin::ManagersResponse,
            admin::ManagerProfileResponse,
            admin::ManagerProfilesResponse,
            admin::IdsRequest,
            admin::ManagerFeedbackResponse,
        )
    ),
    tags(
        (name = "customers", description = "Signup, login, profile and dashboard"),
        (name = "cart", description = "Shopping cart and order history"),
        (name = "wishlist", description = "Saved products"),
        (name = "checkout", description = "Stock reconciliation and M-Pesa payment"),
        (name = "bookings", description = "Service bookings, appointments and apprenticeships"),
        (name = "admin", description = "Manager moderation, requires X-Admin-Key"),
    )
)]
pub struct ApiDoc;
