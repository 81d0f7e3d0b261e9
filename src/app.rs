//! Application state and actions.
//!
//! `App` owns the session context, the active screen, the feed pager
//! for the mounted screen, and the per-posting in-flight bookkeeping.
//! Keyboard handling mutates forms and kicks off network tasks; task
//! completions come back as [`AppMessage`]s and are folded in by
//! [`App::handle_message`].

use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc;

use crate::api::ToeBeansClient;
use crate::error::ApiError;
use crate::events::AppMessage;
use crate::feed::{toggle_like, FeedPager, FeedScope, LikeControl};
use crate::models::{validate_registration, UserProfile, GUEST_EMAIL, GUEST_PASSWORD};
use crate::session::Session;
use crate::upload;

/// The screens of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    /// Global home feed.
    Feed,
    /// One user's page: profile header plus their postings. Covers both
    /// "my page" (name == viewer) and other users.
    Profile { user_name: String },
    /// New-posting composer.
    Compose,
    /// Change-password form.
    Password,
}

impl Screen {
    /// Screens reachable without a session.
    fn is_public(&self) -> bool {
        matches!(self, Screen::Login | Screen::Register)
    }
}

/// Kind of message in the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line feedback shown at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

/// A single text field of a form.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl FormField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: true,
        }
    }
}

/// A focusable stack of text fields.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }
}

/// Top-level application state.
pub struct App {
    pub client: ToeBeansClient,
    pub session: Session,
    pub screen: Screen,

    /// Pager for the mounted feed screen. Recreated on every mount,
    /// never shared across screens.
    pub pager: Option<FeedPager>,
    /// Identifies the current pager instance; page completions tagged
    /// with an older generation are dropped.
    pub feed_generation: u64,
    /// A page fetch is in flight; prevents overlapping fetches that
    /// would read the same cursor twice.
    pub loading_page: bool,
    /// Like control state per visible posting.
    pub like_controls: HashMap<u64, LikeControl>,
    /// Postings with a delete in flight.
    pub deleting: HashSet<u64>,
    /// Selected row in the feed list.
    pub selected: usize,

    /// Profile shown on a profile screen.
    pub profile: Option<UserProfile>,
    /// Viewer-follows-this-user state on another user's page.
    pub following: Option<bool>,
    pub follow_pending: bool,

    pub login_form: Form,
    pub register_form: Form,
    pub compose_form: Form,
    pub password_form: Form,
    /// In-progress self-introduction edit on the viewer's own page.
    pub intro_draft: Option<String>,
    /// Armed by the first press of the account-delete key; the second
    /// press within the same screen confirms.
    pub delete_account_armed: bool,

    pub status: Option<StatusLine>,
    pub login_in_flight: bool,
    pub should_quit: bool,
    pub needs_redraw: bool,
    pub tick_count: u64,

    tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the event loop, which needs ownership for `select!`.
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    pub fn new(client: ToeBeansClient, session: Session) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let screen = if session.is_logged_in() {
            Screen::Feed
        } else {
            Screen::Login
        };
        let mut app = Self {
            client,
            session,
            screen: Screen::Login,
            pager: None,
            feed_generation: 0,
            loading_page: false,
            like_controls: HashMap::new(),
            deleting: HashSet::new(),
            selected: 0,
            profile: None,
            following: None,
            follow_pending: false,
            login_form: Form::new(vec![FormField::new("Email"), FormField::masked("Password")]),
            register_form: Form::new(vec![
                FormField::new("User name"),
                FormField::new("Email"),
                FormField::masked("Password"),
                FormField::masked("Confirm password"),
            ]),
            compose_form: Form::new(vec![
                FormField::new("Title"),
                FormField::new("Image path"),
            ]),
            password_form: Form::new(vec![
                FormField::masked("Old password"),
                FormField::masked("New password"),
            ]),
            intro_draft: None,
            delete_account_armed: false,
            status: None,
            login_in_flight: false,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            tx,
            message_rx: Some(rx),
        };
        app.navigate(screen);
        app
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusLine {
            kind,
            text: text.into(),
        });
        self.mark_dirty();
    }

    fn info(&mut self, text: impl Into<String>) {
        self.set_status(StatusKind::Info, text);
    }

    fn error(&mut self, text: impl Into<String>) {
        self.set_status(StatusKind::Error, text);
    }

    /// The uniform 401 handler: on AuthExpired the session is
    /// invalidated and the app lands on the login screen; every other
    /// error becomes a status-line message.
    pub fn handle_api_error(&mut self, err: ApiError) {
        if err.is_auth_expired() {
            tracing::info!("session expired, redirecting to login");
            self.session.invalidate();
            self.navigate(Screen::Login);
            return;
        }
        tracing::debug!(error = %err, "api call failed");
        self.error(err.user_message());
    }

    // --- navigation --------------------------------------------------

    /// Switch screens, applying the auth gate: authenticated screens
    /// bounce to login when no session is present.
    pub fn navigate(&mut self, screen: Screen) {
        let screen = if screen.is_public() || self.session.is_logged_in() {
            screen
        } else {
            Screen::Login
        };

        self.status = None;
        self.intro_draft = None;
        self.delete_account_armed = false;
        self.mark_dirty();

        match &screen {
            Screen::Feed => {
                self.screen = screen;
                self.mount_feed(FeedScope::Global);
            }
            Screen::Profile { user_name } => {
                let name = user_name.clone();
                self.screen = screen;
                self.mount_profile(name);
            }
            Screen::Login => {
                self.login_form.clear();
                self.screen = screen;
            }
            Screen::Register => {
                self.register_form.clear();
                self.screen = screen;
            }
            Screen::Compose => {
                self.compose_form.clear();
                self.screen = screen;
            }
            Screen::Password => {
                self.password_form.clear();
                self.screen = screen;
            }
        }
    }

    /// Whether the mounted profile screen shows the viewer's own page.
    pub fn viewing_own_page(&self) -> bool {
        match (&self.screen, self.session.login_user_name()) {
            (Screen::Profile { user_name }, Some(me)) => user_name == me,
            _ => false,
        }
    }

    fn mount_feed(&mut self, scope: FeedScope) {
        self.feed_generation += 1;
        self.pager = Some(FeedPager::new(scope));
        self.like_controls.clear();
        self.deleting.clear();
        self.selected = 0;
        self.loading_page = false;
        self.profile = None;
        self.following = None;
        self.follow_pending = false;
        self.request_next_page();
    }

    fn mount_profile(&mut self, user_name: String) {
        self.mount_feed(FeedScope::User(user_name.clone()));

        let client = self.client.clone();
        let tx = self.tx.clone();
        let name = user_name.clone();
        let own_page = self.session.login_user_name() == Some(user_name.as_str());
        tokio::spawn(async move {
            let result = if own_page {
                client.get_my_profile().await
            } else {
                client.get_user_profile(&name).await
            };
            let _ = tx.send(AppMessage::ProfileLoaded {
                user_name: name,
                result,
            });
        });

        if !own_page {
            let client = self.client.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let result = client.get_follow_state(&user_name).await;
                let _ = tx.send(AppMessage::FollowStateLoaded { user_name, result });
            });
        }
    }

    // --- feed actions -------------------------------------------------

    /// Kick off the next page fetch unless one is already in flight or
    /// the feed is exhausted.
    pub fn request_next_page(&mut self) {
        if self.loading_page {
            return;
        }
        let request = match self.pager.as_ref().and_then(|p| p.next_request()) {
            Some(r) => r,
            None => return,
        };
        self.loading_page = true;
        let generation = self.feed_generation;
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client
                .get_postings(request.since_at, request.limit, request.user_name.as_deref())
                .await;
            let _ = tx.send(AppMessage::PageLoaded { generation, result });
        });
    }

    /// Move the selection and pull the next page when the user is near
    /// the end of what is loaded.
    pub fn select_next(&mut self) {
        let len = self.pager.as_ref().map(|p| p.items().len()).unwrap_or(0);
        if len == 0 {
            return;
        }
        if self.selected + 1 < len {
            self.selected += 1;
        }
        // Scroll-edge trigger: three rows of headroom.
        if self.selected + 3 >= len {
            self.request_next_page();
        }
        self.mark_dirty();
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.mark_dirty();
        }
    }

    fn selected_posting(&self) -> Option<&crate::models::Posting> {
        self.pager.as_ref().and_then(|p| p.items().get(self.selected))
    }

    /// Toggle the like on the selected posting (pessimistic: the list
    /// only changes when the server confirms).
    pub fn toggle_selected_like(&mut self) {
        let (posting_id, liked, liked_count) = match self.selected_posting() {
            Some(p) => (p.posting_id, p.liked, p.liked_count),
            None => return,
        };
        let control = self
            .like_controls
            .entry(posting_id)
            .or_insert_with(|| LikeControl::from_liked(liked));
        if !control.begin() {
            // A toggle for this posting is already in flight.
            return;
        }
        self.mark_dirty();

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = toggle_like(&client, posting_id, liked, liked_count).await;
            let _ = tx.send(AppMessage::LikeResolved { posting_id, result });
        });
    }

    /// Delete the selected posting. Only offered for the viewer's own
    /// postings; the server enforces authorship regardless.
    pub fn delete_selected(&mut self) {
        let posting = match self.selected_posting() {
            Some(p) => p.clone(),
            None => return,
        };
        if Some(posting.user_name.as_str()) != self.session.login_user_name() {
            return;
        }
        if !self.deleting.insert(posting.posting_id) {
            return;
        }
        self.mark_dirty();

        let posting_id = posting.posting_id;
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = crate::feed::delete_posting(&client, posting_id).await;
            let _ = tx.send(AppMessage::DeleteResolved { posting_id, result });
        });
    }

    /// Open the selected posting's author page.
    pub fn open_selected_author(&mut self) {
        if let Some(posting) = self.selected_posting() {
            let user_name = posting.user_name.clone();
            self.navigate(Screen::Profile { user_name });
        }
    }

    // --- session actions ----------------------------------------------

    pub fn submit_login(&mut self) {
        let email = self.login_form.value(0).to_string();
        let password = self.login_form.value(1).to_string();
        if email.is_empty() || password.is_empty() {
            self.error("Email and password are required");
            return;
        }
        self.start_login(email, password);
    }

    pub fn submit_guest_login(&mut self) {
        self.start_login(GUEST_EMAIL.to_string(), GUEST_PASSWORD.to_string());
    }

    fn start_login(&mut self, email: String, password: String) {
        if self.login_in_flight {
            return;
        }
        self.login_in_flight = true;
        self.status = None;
        self.mark_dirty();

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = async {
                client.login(&email, &password).await?;
                client.get_my_profile().await
            }
            .await;
            let _ = tx.send(AppMessage::LoginFinished(result));
        });
    }

    pub fn logout(&mut self) {
        // Local flags only; the original client never told the server.
        self.session.invalidate();
        self.navigate(Screen::Login);
        self.info("Logged out");
    }

    pub fn submit_registration(&mut self) {
        let user_name = self.register_form.value(0).to_string();
        let email = self.register_form.value(1).to_string();
        let password = self.register_form.value(2).to_string();
        let confirm = self.register_form.value(3).to_string();
        if let Err(message) = validate_registration(&user_name, &email, &password, &confirm) {
            self.error(message);
            return;
        }
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.register_user(&user_name, &email, &password).await;
            let _ = tx.send(AppMessage::RegisterFinished(result));
        });
    }

    pub fn submit_password_change(&mut self) {
        let old_password = self.password_form.value(0).to_string();
        let new_password = self.password_form.value(1).to_string();
        if old_password.is_empty() || new_password.is_empty() {
            self.error("Both passwords are required");
            return;
        }
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.change_password(&old_password, &new_password).await;
            let _ = tx.send(AppMessage::PasswordChanged(result));
        });
    }

    /// Delete the viewer's account. First call arms, second confirms.
    pub fn delete_account(&mut self) {
        let user_name = match self.session.login_user_name() {
            Some(name) => name.to_string(),
            None => return,
        };
        if !self.delete_account_armed {
            self.delete_account_armed = true;
            self.info("Press again to permanently delete your account");
            return;
        }
        self.delete_account_armed = false;
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.delete_user(&user_name).await;
            let _ = tx.send(AppMessage::AccountDeleted(result));
        });
    }

    // --- posting / profile actions -------------------------------------

    pub fn submit_posting(&mut self) {
        let title = self.compose_form.value(0).to_string();
        let image_path = self.compose_form.value(1).to_string();
        if title.is_empty() || image_path.is_empty() {
            self.error("Title and image are required");
            return;
        }
        // Size check and encoding happen before anything is sent.
        let image = match upload::encode_image(std::path::Path::new(&image_path)) {
            Ok(encoded) => encoded,
            Err(message) => {
                self.error(message);
                return;
            }
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.create_posting(&title, &image).await;
            let _ = tx.send(AppMessage::PostingCreated(result));
        });
    }

    /// Start editing the self-introduction on the viewer's own page.
    pub fn start_intro_edit(&mut self) {
        if !self.viewing_own_page() {
            return;
        }
        let current = self
            .profile
            .as_ref()
            .map(|p| p.self_introduction.clone())
            .unwrap_or_default();
        self.intro_draft = Some(current);
        self.mark_dirty();
    }

    pub fn save_intro_edit(&mut self) {
        let draft = match self.intro_draft.take() {
            Some(d) => d,
            None => return,
        };
        let user_name = match self.session.login_user_name() {
            Some(name) => name.to_string(),
            None => return,
        };
        if let Some(profile) = self.profile.as_mut() {
            profile.self_introduction = draft.clone();
        }
        let request = crate::models::UpdateUserRequest {
            password: String::new(),
            icon: String::new(),
            self_introduction: draft,
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.update_user(&user_name, &request).await;
            let _ = tx.send(AppMessage::IntroductionSaved(result));
        });
    }

    /// Follow or unfollow the user whose page is mounted.
    pub fn toggle_follow(&mut self) {
        if self.viewing_own_page() || self.follow_pending {
            return;
        }
        let user_name = match &self.screen {
            Screen::Profile { user_name } => user_name.clone(),
            _ => return,
        };
        let currently_following = self.following.unwrap_or(false);
        let target = !currently_following;
        self.follow_pending = true;
        self.mark_dirty();

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = if target {
                client.follow(&user_name).await
            } else {
                client.unfollow(&user_name).await
            };
            let _ = tx.send(AppMessage::FollowResolved {
                user_name,
                following: target,
                result,
            });
        });
    }

    // --- message handling ----------------------------------------------

    pub fn handle_message(&mut self, message: AppMessage) {
        self.mark_dirty();
        match message {
            AppMessage::LoginFinished(result) => {
                self.login_in_flight = false;
                match result {
                    Ok(profile) => {
                        self.session.establish(profile.user_name.clone());
                        self.navigate(Screen::Feed);
                    }
                    Err(err) => self.handle_api_error(err),
                }
            }
            AppMessage::RegisterFinished(result) => match result {
                Ok(()) => {
                    self.navigate(Screen::Login);
                    self.info("Registration successful, please log in");
                }
                Err(err) => self.handle_api_error(err),
            },
            AppMessage::PageLoaded { generation, result } => {
                if generation != self.feed_generation {
                    // Completion for a pager that was unmounted; the
                    // navigation already discarded its state.
                    return;
                }
                self.loading_page = false;
                match result {
                    Ok(page) => {
                        if let Some(pager) = self.pager.as_mut() {
                            for posting in pager.apply_page(page.postings) {
                                self.like_controls
                                    .entry(posting.posting_id)
                                    .or_insert_with(|| LikeControl::from_liked(posting.liked));
                            }
                        }
                    }
                    Err(err) => self.handle_api_error(err),
                }
            }
            AppMessage::LikeResolved { posting_id, result } => match result {
                Ok(outcome) => {
                    if let Some(control) = self.like_controls.get_mut(&posting_id) {
                        control.resolve(&outcome);
                    }
                    if let Some(pager) = self.pager.as_mut() {
                        pager.set_like(posting_id, outcome.liked, outcome.liked_count);
                    }
                }
                Err(err) => {
                    if let Some(control) = self.like_controls.get_mut(&posting_id) {
                        control.fail();
                    }
                    self.handle_api_error(err);
                }
            },
            AppMessage::DeleteResolved { posting_id, result } => {
                self.deleting.remove(&posting_id);
                match result {
                    Ok(()) => {
                        if let Some(pager) = self.pager.as_mut() {
                            pager.remove(posting_id);
                        }
                        self.like_controls.remove(&posting_id);
                        let len = self.pager.as_ref().map(|p| p.items().len()).unwrap_or(0);
                        if self.selected >= len && len > 0 {
                            self.selected = len - 1;
                        }
                        self.info("Posting deleted");
                    }
                    Err(err) => self.handle_api_error(err),
                }
            }
            AppMessage::ProfileLoaded { user_name, result } => {
                if !matches!(&self.screen, Screen::Profile { user_name: current } if *current == user_name)
                {
                    return;
                }
                match result {
                    Ok(profile) => self.profile = Some(profile),
                    Err(err) => self.handle_api_error(err),
                }
            }
            AppMessage::FollowStateLoaded { user_name, result } => {
                if !matches!(&self.screen, Screen::Profile { user_name: current } if *current == user_name)
                {
                    return;
                }
                match result {
                    Ok(state) => self.following = Some(state.following),
                    Err(err) => self.handle_api_error(err),
                }
            }
            AppMessage::FollowResolved {
                user_name,
                following,
                result,
            } => {
                self.follow_pending = false;
                if !matches!(&self.screen, Screen::Profile { user_name: current } if *current == user_name)
                {
                    return;
                }
                match result {
                    Ok(()) => self.following = Some(following),
                    Err(err) => self.handle_api_error(err),
                }
            }
            AppMessage::PostingCreated(result) => match result {
                Ok(()) => {
                    // Back to a fresh home feed so the new posting shows.
                    self.navigate(Screen::Feed);
                    self.info("Posted");
                }
                Err(err) => self.handle_api_error(err),
            },
            AppMessage::IntroductionSaved(result) => match result {
                Ok(()) => self.info("Profile updated"),
                Err(err) => self.handle_api_error(err),
            },
            AppMessage::PasswordChanged(result) => match result {
                Ok(()) => {
                    self.navigate(Screen::Feed);
                    self.info("Password changed");
                }
                Err(err) => self.handle_api_error(err),
            },
            AppMessage::AccountDeleted(result) => match result {
                Ok(()) => {
                    self.session.invalidate();
                    self.navigate(Screen::Login);
                    self.info("Account deleted");
                }
                Err(err) => self.handle_api_error(err),
            },
        }
    }
}
