use crate::driver::{Locator, PageElement, SessionDriver, WaitCondition};
use crate::{Error, Pacing, Result, ScrapeConfig};
use std::fmt;
use std::time::Duration;

const ACCEPT_ALL_BUTTON: &str = "//button[contains(text(), 'Accept all')]";
const PROFILE_MENU_BUTTON: &str = "cnky2vc";
const PROFILE_MENU: &str = "simple-header-profile-menu";
const LOGIN_LINK: &str = "a[data-testid='cypress-headernav-login']";
const CONTINUE_WITH_EMAIL: &str = "button[data-testid='social-auth-button-email']";
const EMAIL_INPUT: &str = "email-login-email";
const SUBMIT_BUTTON: &str = "button[data-testid='signup-login-submit-btn']";
const PASSWORD_INPUT: &str = "email-signup-password";

/// Account credentials, passed through to the login form untouched
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Walks the site's email login flow
pub struct Authenticator {
    home_url: String,
    timeout: Duration,
    pacing: Pacing,
}

impl Authenticator {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            home_url: config.home_url.clone(),
            timeout: config.wait_timeout(),
            pacing: config.pacing(),
        }
    }

    /// Log in, or tear the session down and return the error.
    ///
    /// Nothing is retried; a login that fails part way leaves the remote UI
    /// in an unknown state, so the caller is expected to stop.
    pub async fn login<D: SessionDriver>(
        &self,
        driver: &mut D,
        credentials: &Credentials,
    ) -> Result<()> {
        match self.run_login(driver, credentials).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("Error during login process.");
                tracing::error!("{}", e);
                if let Err(quit_err) = driver.quit().await {
                    tracing::warn!("Failed to close browser after login error: {}", quit_err);
                }
                Err(e)
            }
        }
    }

    async fn run_login<D: SessionDriver>(
        &self,
        driver: &mut D,
        credentials: &Credentials,
    ) -> Result<()> {
        driver.navigate(&self.home_url).await?;
        tracing::info!("Navigated to {}", self.home_url);
        self.pacing.step().await;

        self.clickable(driver, &Locator::xpath(ACCEPT_ALL_BUTTON))
            .await?
            .click()
            .await?;
        tracing::debug!("Dismissed cookie consent.");

        self.clickable(driver, &Locator::class(PROFILE_MENU_BUTTON))
            .await?
            .click()
            .await?;
        tracing::info!("Profile menu button clicked.");
        self.pacing.step().await;

        let menu = driver
            .wait_for(&Locator::id(PROFILE_MENU), WaitCondition::Present, self.timeout)
            .await?;
        let login_link = menu
            .find_all(&Locator::css(LOGIN_LINK))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ElementNotFound(Locator::css(LOGIN_LINK).to_string()))?;
        login_link.click().await?;
        tracing::info!("Clicked on the 'Log in' link.");
        self.pacing.step().await;

        self.clickable(driver, &Locator::css(CONTINUE_WITH_EMAIL))
            .await?
            .click()
            .await?;
        tracing::info!("Clicked on 'Continue with email' button.");
        self.pacing.step().await;

        let email_input = driver
            .wait_for(&Locator::id(EMAIL_INPUT), WaitCondition::Present, self.timeout)
            .await?;
        self.type_slowly(&email_input, &credentials.email).await?;
        tracing::info!("Entered email address.");
        self.pacing.after_typing().await;

        self.clickable(driver, &Locator::css(SUBMIT_BUTTON))
            .await?
            .click()
            .await?;
        tracing::info!("Clicked on the 'Continue' button.");
        self.pacing.step().await;

        let password_input = driver
            .wait_for(&Locator::id(PASSWORD_INPUT), WaitCondition::Present, self.timeout)
            .await?;
        self.type_slowly(&password_input, &credentials.password).await?;
        tracing::info!("Entered password.");
        self.pacing.step().await;

        self.clickable(driver, &Locator::css(SUBMIT_BUTTON))
            .await?
            .click()
            .await?;
        self.pacing.settle().await;
        tracing::info!("Clicked on the 'Log in' button.");

        Ok(())
    }

    async fn clickable<D: SessionDriver>(
        &self,
        driver: &mut D,
        locator: &Locator,
    ) -> Result<D::Element> {
        driver
            .wait_for(locator, WaitCondition::Clickable, self.timeout)
            .await
    }

    /// One key at a time, with a short pause after each
    async fn type_slowly<E: PageElement>(&self, input: &E, text: &str) -> Result<()> {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            input.send_keys(ch.encode_utf8(&mut buf)).await?;
            self.pacing.keystroke().await;
        }
        Ok(())
    }
}
