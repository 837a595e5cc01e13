//! Application shell: wires the session, controllers and navigator together
//! and decides which screen a renderer should draw.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use comite_api::Member;

use crate::auth::{AuthController, RegistrationForm};
use crate::committees::{load_all_committees, load_my_committee, CommitteeSummary, CommitteeViewError, MyCommittee};
use crate::config::ClientConfig;
use crate::directory::Directories;
use crate::error::{LoginError, SubmitError};
use crate::form::FieldChange;
use crate::navigation::{MenuLayout, NavEvent, Navigator, Route};
use crate::profile::ProfileEditor;
use crate::session::storage::SessionStorage;
use crate::session::{Session, SessionStore};

/// Which side of the sign-in/sign-up card is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPanel {
    #[default]
    SignIn,
    SignUp,
}

/// What the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SignIn,
    SignUp,
    Main(Route),
}

pub struct App {
    directories: Directories,
    sessions: SessionStore,
    auth: AuthController,
    registration: RegistrationForm,
    navigator: Navigator,
    auth_panel: AuthPanel,
    dismiss_after: Duration,
}

impl App {
    /// Build the shell and restore any persisted session before the first
    /// screen is computed.
    pub fn bootstrap(
        directories: Directories,
        storage: Arc<dyn SessionStorage>,
        config: &ClientConfig,
        layout: MenuLayout,
    ) -> Self {
        let sessions = SessionStore::open(storage);
        let auth = AuthController::new(directories.members.clone());
        let registration = RegistrationForm::new(directories.clone(), config.notification_dismiss);
        let navigator = Navigator::new(layout).with_narrow_width(config.narrow_viewport_width);

        Self {
            directories,
            sessions,
            auth,
            registration,
            navigator,
            auth_panel: AuthPanel::SignIn,
            dismiss_after: config.notification_dismiss,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.sessions.is_authenticated() {
            return Screen::Main(self.navigator.active());
        }
        match self.auth_panel {
            AuthPanel::SignIn => Screen::SignIn,
            AuthPanel::SignUp => Screen::SignUp,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.sessions.current()
    }

    pub fn directories(&self) -> &Directories {
        &self.directories
    }

    pub fn auth(&self) -> &AuthController {
        &self.auth
    }

    pub fn registration(&self) -> &RegistrationForm {
        &self.registration
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn show_sign_in(&mut self) {
        self.auth_panel = AuthPanel::SignIn;
        self.auth.dismiss_error();
    }

    /// Switch to the registration form and fetch its options.
    pub async fn show_sign_up(&mut self) {
        self.auth_panel = AuthPanel::SignUp;
        self.registration.load().await;
    }

    pub async fn login(&mut self, input: &str) -> Result<Session, LoginError> {
        let session = self.auth.login(input, &mut self.sessions).await?;
        self.navigator.reset();
        Ok(session)
    }

    pub fn dismiss_login_error(&mut self) {
        self.auth.dismiss_error();
    }

    pub fn update_registration(&mut self, change: FieldChange) {
        self.registration.apply(change);
    }

    /// Submit the registration form. On success the user is sent back to
    /// sign in with the new cédula.
    pub async fn register(&mut self) -> Result<Member, SubmitError> {
        let saved = self.registration.submit().await?;
        self.auth_panel = AuthPanel::SignIn;
        Ok(saved)
    }

    pub fn logout(&mut self) {
        self.auth.logout(&mut self.sessions);
        self.navigator.reset();
        self.auth_panel = AuthPanel::SignIn;
        info!("Logged out");
    }

    /// Navigation is only accepted behind the session gate. Viewport changes
    /// are tracked either way.
    pub fn handle(&mut self, event: NavEvent) {
        if self.sessions.is_authenticated() || matches!(event, NavEvent::ViewportResized { .. }) {
            self.navigator.handle(event);
        }
    }

    pub fn navigate(&mut self, route: Route) {
        self.handle(NavEvent::Navigate(route));
    }

    /// A fresh profile editor for the dashboard, loaded for the current
    /// session.
    pub async fn open_profile(&self) -> ProfileEditor {
        let mut editor = ProfileEditor::new(self.directories.members.clone(), self.dismiss_after);
        editor
            .load(self.session().map(|session| session.cedula.as_str()))
            .await;
        editor
    }

    /// Save the dashboard's staged edits. A saved record with a new cédula
    /// becomes the session identity, so the next profile load finds it.
    pub async fn save_profile(
        &mut self,
        editor: &mut ProfileEditor,
    ) -> Result<Option<Member>, SubmitError> {
        let saved = editor.save().await?;
        if let Some(member) = saved.as_ref().filter(|_| self.sessions.is_authenticated()) {
            let session = Session::from_member(member);
            match self.sessions.sync(session) {
                Ok(true) => info!("Session identity updated from profile"),
                Ok(false) => {}
                Err(e) => warn!(error = %e, "Failed to persist updated session"),
            }
        }
        Ok(saved)
    }

    pub async fn my_committee(&self) -> Result<MyCommittee, CommitteeViewError> {
        let comite_id = self.session().and_then(|session| session.comite_id);
        load_my_committee(&self.directories, comite_id).await
    }

    pub async fn all_committees(&self) -> Result<Vec<CommitteeSummary>, CommitteeViewError> {
        load_all_committees(&self.directories).await
    }
}
