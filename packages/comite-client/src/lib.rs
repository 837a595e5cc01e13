//! Session and form-state engine for the committee membership client.
//!
//! Members log in with their cédula alone, new members register themselves,
//! and the authenticated shell switches between the personal dashboard, the
//! member's own committee and the committee directory.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use comite_api::ApiClient;
//! use comite_client::{App, ClientConfig, Directories, FileStorage, MenuLayout, Screen};
//!
//! let config = ClientConfig::from_env()?;
//! let api = Arc::new(ApiClient::new(&config.api_url)?);
//! let storage = Arc::new(FileStorage::new(&config.data_dir));
//!
//! let mut app = App::bootstrap(Directories::from_shared(api), storage, &config, MenuLayout::TopBar);
//! if app.screen() == Screen::SignIn {
//!     app.login("001-1234567-8").await?;
//! }
//! ```
//!
//! # Modules
//!
//! - [`validation`] / [`format`] - pure field checks and keystroke formatting
//! - [`form`] - drafts and the keystroke reducer
//! - [`session`] - persisted session lifecycle
//! - [`auth`] - login and self-registration controllers
//! - [`profile`] - dashboard profile editing
//! - [`committees`] - committee views
//! - [`navigation`] - route and menu state machine
//! - [`shell`] - composition of all of the above
//! - [`testing`] - in-memory directory for tests

pub mod auth;
pub mod committees;
pub mod config;
pub mod directory;
pub mod error;
pub mod form;
pub mod format;
pub mod navigation;
pub mod notification;
pub mod profile;
pub mod session;
pub mod shell;
pub mod testing;
pub mod validation;

pub use comite_api::{Committee, Member, Role};

pub use auth::{AuthController, LoginState, RegistrationForm};
pub use committees::{CommitteeSummary, CommitteeViewError, MyCommittee};
pub use config::ClientConfig;
pub use directory::{CommitteeDirectory, Directories, MemberDirectory, RoleDirectory};
pub use error::{DirectoryError, LoginError, SessionError, StorageError, SubmitError};
pub use form::{Draft, FieldChange};
pub use format::{format_cedula, format_telefono, strip_formatting};
pub use navigation::{MenuLayout, NavEvent, Navigator, Route, SidePanel};
pub use notification::Notification;
pub use profile::{ProfileEditor, ProfileState};
pub use session::storage::{FileStorage, MemoryStorage, SessionStorage};
pub use session::{Session, SessionStore, SESSION_KEY};
pub use shell::{App, AuthPanel, Screen};
pub use validation::{validate_field, validate_form, Field, FieldErrors};
