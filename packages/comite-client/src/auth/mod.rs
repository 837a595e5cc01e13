//! Login and self-registration.

pub mod login;
pub mod register;

pub use login::{lookup_session, normalize_login_input, AuthController, LoginState};
pub use register::{
    prepare_registration, resolve_default_role, RegistrationForm, DEFAULT_ROLE_NAME,
    FALLBACK_ROLE_ID,
};
