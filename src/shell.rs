//! Interactive shell. One process holds one session and one cart.
//!
//! DESIGN
//! ======
//! Each input line is split with shell quoting rules, parsed with the same
//! clap `Command` tree the binary accepts as a one-shot subcommand, then
//! dispatched to a page view-model. The profile page is rebuilt whenever
//! the session changes hands, so one account's data is never sent with
//! another account's token.
//! The shell tracks the current location so navigating away from the menu
//! drops any in-flight load, and renders page state as plain text.
//!
//! ERROR HANDLING
//! ==============
//! API failures never end the shell; they land in the page's error banner
//! and are printed. Only output I/O failures propagate as `CliError`.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use std::io::Write;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::app::AppContext;
use crate::config::ConfigError;
use crate::net::ApiError;
use crate::pages::Route;
use crate::pages::cart::CartPage;
use crate::pages::foods::{FoodsPage, MenuQuery, category_emoji, description_of, format_price};
use crate::pages::login::LoginPage;
use crate::pages::navbar::Navbar;
use crate::pages::profile::ProfilePage;
use crate::pages::register::RegisterPage;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not start the API client: {0}")]
    Client(#[from] ApiError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in and store the session token.
    Login { username: String, password: String },
    /// Create an account (does not log in).
    Register { username: String, password: String },
    /// Forget the session token.
    Logout,
    /// List the menu.
    Menu {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        cuisine: Option<String>,
    },
    /// Add a listed food to the cart by id.
    Add { id: String },
    /// Show the cart.
    Cart,
    /// Set the quantity of a cart line; 0 or less removes it.
    #[command(alias = "quantity")]
    Qty {
        id: String,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove a cart line.
    Remove { id: String },
    /// Empty the cart.
    Clear,
    /// Show or manage the account.
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Go to a page by path, e.g. `/foods?search=pizza`.
    Nav { path: String },
    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Password { old: String, new: String },
    Delete {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(name = "foodbites", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W> {
    ctx: AppContext,
    out: W,
    location: String,
    login: LoginPage,
    register: RegisterPage,
    foods: FoodsPage,
    cart: CartPage,
    profile: ProfilePage,
}

impl<W: Write> Shell<W> {
    pub fn new(ctx: AppContext, out: W) -> Self {
        Self {
            ctx,
            out,
            location: Route::Home.path().to_owned(),
            login: LoginPage::new(),
            register: RegisterPage::new(),
            foods: FoodsPage::new(),
            cart: CartPage::new(),
            profile: ProfilePage::new(),
        }
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until EOF or `quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<(), CliError> {
        let mut lines = input.lines();
        loop {
            write!(self.out, "foodbites {}> ", self.location)?;
            self.out.flush()?;
            let Some(line) = lines.next_line().await? else {
                writeln!(self.out)?;
                return Ok(());
            };
            if self.execute_line(&line).await? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Parse and run one line. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub async fn execute_line(&mut self, line: &str) -> Result<Flow, CliError> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(self.out, "error: {e}")?;
                return Ok(Flow::Continue);
            }
        };
        match ShellLine::try_parse_from(words) {
            Ok(parsed) => self.execute(parsed.command).await,
            Err(e) => {
                write!(self.out, "{}", e.render())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Run one command against the page view-models.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub async fn execute(&mut self, command: Command) -> Result<Flow, CliError> {
        debug!(?command, "shell command");
        match command {
            Command::Login { username, password } => {
                self.go(Route::Login.path());
                self.login.form.set_field("username", username);
                self.login.form.set_field("password", password);
                if self.login.submit(&self.ctx).await {
                    self.profile = ProfilePage::new();
                    self.go(Route::Home.path());
                }
                self.banners(self.login.error.clone(), self.login.success.clone())?;
                self.login.form.password.clear();
            }
            Command::Register { username, password } => {
                self.go(Route::Register.path());
                self.register.form.set_field("username", username);
                self.register.form.set_field("password", password);
                self.register.submit(&self.ctx).await;
                self.banners(self.register.error.clone(), self.register.success.clone())?;
            }
            Command::Logout => {
                self.ctx.session.logout();
                self.profile = ProfilePage::new();
                writeln!(self.out, "Logged out")?;
            }
            Command::Menu { search, cuisine } => {
                self.go(Route::Foods.path());
                self.foods.load(&self.ctx, MenuQuery { search, cuisine }).await;
                self.print_menu()?;
            }
            Command::Add { id } => {
                if !self.foods.foods.iter().any(|f| f.id == id) {
                    let query = self.foods.query().clone();
                    self.foods.load(&self.ctx, query).await;
                }
                self.foods.add_to_cart(&self.ctx, &id).await;
                self.banners(self.foods.error.clone(), self.foods.success.clone())?;
            }
            Command::Cart => {
                self.go(Route::Cart.path());
                self.print_cart()?;
            }
            Command::Qty { id, qty } => {
                self.cart.set_quantity(&self.ctx, &id, qty);
                self.print_cart_notice()?;
            }
            Command::Remove { id } => {
                self.cart.remove(&self.ctx, &id);
                self.print_cart_notice()?;
            }
            Command::Clear => {
                self.cart.clear(&self.ctx);
                self.print_cart_notice()?;
            }
            Command::Profile { action } => self.profile_command(action).await?,
            Command::Nav { path } => self.navigate(&path).await?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn profile_command(&mut self, action: Option<ProfileAction>) -> Result<(), CliError> {
        self.go(Route::Profile.path());
        let Some(action) = action else {
            self.profile.load(&self.ctx).await;
            return self.print_profile();
        };

        if !self.profile.is_loaded_for(&self.ctx) && !self.profile.load(&self.ctx).await {
            return self.print_profile();
        }
        match action {
            ProfileAction::Update { username, email } => {
                if let Some(username) = username {
                    self.profile.username = username;
                }
                if let Some(email) = email {
                    self.profile.email = email;
                }
                self.profile.update_profile(&self.ctx).await;
            }
            ProfileAction::Password { old, new } => {
                self.profile.old_password = old;
                self.profile.new_password = new;
                self.profile.change_password(&self.ctx).await;
            }
            ProfileAction::Delete { yes } => {
                if let Some(next) = self.profile.delete_account(&self.ctx, yes).await {
                    let message = self.profile.form_success.take();
                    self.profile = ProfilePage::new();
                    self.go(next.path());
                    return self.banners(None, message);
                }
            }
        }
        self.banners(self.profile.form_error.clone(), self.profile.form_success.clone())
    }

    async fn navigate(&mut self, path: &str) -> Result<(), CliError> {
        let Some(route) = Route::from_path(path) else {
            writeln!(self.out, "No page at {path}")?;
            return Ok(());
        };
        self.go(path);
        match route {
            Route::Foods => {
                self.foods.load(&self.ctx, menu_query_from(path)).await;
                self.print_menu()
            }
            Route::Cart => self.print_cart(),
            Route::Profile => {
                self.profile.load(&self.ctx).await;
                self.print_profile()
            }
            Route::Orders => {
                writeln!(self.out, "No orders yet")?;
                Ok(())
            }
            Route::Home | Route::Login | Route::Register => {
                let nav = Navbar::render(&self.ctx, &self.location);
                writeln!(self.out, "{}", nav.line())?;
                Ok(())
            }
        }
    }

    /// Change location. Leaving the menu drops its in-flight load.
    fn go(&mut self, path: &str) {
        if Route::from_path(&self.location) == Some(Route::Foods) && Route::from_path(path) != Some(Route::Foods) {
            self.foods.leave();
        }
        path.clone_into(&mut self.location);
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    fn banners(&mut self, error: Option<String>, success: Option<String>) -> Result<(), CliError> {
        if let Some(error) = error {
            writeln!(self.out, "error: {error}")?;
        }
        if let Some(success) = success {
            writeln!(self.out, "{success}")?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<(), CliError> {
        if let Some(error) = &self.foods.error {
            writeln!(self.out, "error: {error}")?;
            return Ok(());
        }
        if self.foods.is_empty_menu() {
            writeln!(self.out, "No food items found")?;
            return Ok(());
        }
        for food in &self.foods.foods {
            let marker = if self.foods.highlighted.as_deref() == Some(food.id.as_str()) { "*" } else { " " };
            writeln!(
                self.out,
                "{marker} {} {} [{}] {} - {}",
                category_emoji(food.category.as_deref()),
                food.name,
                food.id,
                format_price(food.price),
                description_of(food),
            )?;
            if let Some(image) = food.image.as_deref().filter(|i| !i.is_empty()) {
                writeln!(self.out, "    image: {}", self.ctx.api.image_url(image))?;
            }
        }
        Ok(())
    }

    fn print_cart(&mut self) -> Result<(), CliError> {
        let view = self.cart.view(&self.ctx);
        if view.is_empty() {
            writeln!(self.out, "Your cart is empty")?;
            return Ok(());
        }
        for line in &view.lines {
            writeln!(
                self.out,
                "{} [{}] {} x {} = {}",
                line.item.name,
                line.item.id,
                format_price(line.item.price),
                line.item.quantity,
                format_price(line.line_total),
            )?;
        }
        writeln!(self.out, "Total ({} items): {}", view.item_count, format_price(view.total))?;
        Ok(())
    }

    fn print_cart_notice(&mut self) -> Result<(), CliError> {
        if let Some(notice) = self.cart.notice.take() {
            writeln!(self.out, "{notice}")?;
        }
        self.print_cart()
    }

    fn print_profile(&mut self) -> Result<(), CliError> {
        if let Some(error) = &self.profile.error {
            writeln!(self.out, "error: {error}")?;
            return Ok(());
        }
        if let Some(user) = &self.profile.user {
            writeln!(self.out, "Username: {}", user.username)?;
            writeln!(self.out, "Email: {}", user.email.as_deref().unwrap_or("-"))?;
            if let Some(since) = user.member_since() {
                writeln!(self.out, "Member since: {since}")?;
            }
        }
        Ok(())
    }
}

/// `search` and `cuisine` from a `/foods?...` location, form-decoded.
fn menu_query_from(location: &str) -> MenuQuery {
    let mut query = MenuQuery::default();
    let Some((_, params)) = location.split_once('?') else {
        return query;
    };
    let params = params.split('#').next().unwrap_or(params);
    for (key, value) in url::form_urlencoded::parse(params.as_bytes()) {
        match key.as_ref() {
            "search" => query.search = Some(value.into_owned()),
            "cuisine" => query.cuisine = Some(value.into_owned()),
            _ => {}
        }
    }
    query
}
