//! Route paths shared by the router, guards, and redirects.

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const ADMIN_LOGIN: &str = "/admin/login";
pub const REGISTER: &str = "/register";
pub const VERIFY_EMAIL: &str = "/verify-email";
pub const FORGOT_PASSWORD: &str = "/forgot-password";
pub const RESET_VERIFY_OTP: &str = "/reset/verify-otp";
pub const RESET_NEW_PASSWORD: &str = "/reset/new-password";
pub const BOOKINGS: &str = "/bookings";
pub const LOCAL_GUIDE_HOME: &str = "/provider/local-guide";
pub const EQUIPMENT_RENTER_HOME: &str = "/provider/equipment-renter";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const TRAVEL_BUDDY: &str = "/travel-buddy";
pub const SETTINGS: &str = "/settings";
pub const UNAUTHORIZED: &str = "/unauthorized";

/// Query parameter carrying the pre-redirect location.
pub const RETURN_PARAM: &str = "from";
