//! Cookie-session settings read from the environment.
//!
//! Release builds insist on explicit, valid values for every toggle. Debug
//! builds log a warning and fall back to a default instead, so a bare
//! `cargo run` works without any secrets mounted.
//!
//! | Variable                  | Meaning                                  | Default          |
//! |---------------------------|------------------------------------------|------------------|
//! | `SESSION_KEY_FILE`        | Path to at least 64 bytes of key material | `/var/run/secrets/session_key` |
//! | `SESSION_COOKIE_SECURE`   | Mark the cookie `Secure`                 | `1` (debug only) |
//! | `SESSION_SAMESITE`        | `Strict`, `Lax` or `None`                | `Lax` (debug only) |
//! | `SESSION_ALLOW_EPHEMERAL` | Generate a key when the file is missing  | `0` (debug only) |
//! | `SESSION_TTL_HOURS`       | Lifetime of the persistent cookie        | `2`              |

use std::path::PathBuf;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite, time::Duration};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

pub const SESSION_COOKIE_NAME: &str = "session";
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const SESSION_TTL_DEFAULT_HOURS: i64 = 2;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const TTL_ENV: &str = "SESSION_TTL_HOURS";

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const TTL_EXPECTED: &str = "a positive number of hours";

/// How strictly the environment is validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or invalid toggles fall back to defaults with a warning.
    Debug,
    /// Missing or invalid toggles are errors.
    Release,
}

impl BuildMode {
    /// The mode matching `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_api::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) {
    ///     BuildMode::Debug
    /// } else {
    ///     BuildMode::Release
    /// };
    /// assert_eq!(BuildMode::current(), expected);
    /// ```
    #[must_use]
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Keep `parsed` in release builds; in debug builds swap an error for
    /// `fallback` and log it.
    fn settle<T>(
        self,
        parsed: Result<T, SessionConfigError>,
        fallback: T,
    ) -> Result<T, SessionConfigError> {
        match (self, parsed) {
            (_, Ok(value)) => Ok(value),
            (Self::Debug, Err(error)) => {
                warn!(%error, "session setting fallback in debug build");
                Ok(fallback)
            }
            (Self::Release, Err(error)) => Err(error),
        }
    }
}

/// Validated cookie-session settings.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    pub ttl: Duration,
}

impl SessionSettings {
    /// Session middleware sealed with these settings.
    ///
    /// Cookies are private (encrypted), HTTP-only and scoped to `/`.
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_same_site(self.same_site)
            .session_lifecycle(PersistentSession::default().session_ttl(self.ttl))
            .build()
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate session settings.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use recipe_api::inbound::http::session_config::{BuildMode, session_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = mode.settle(required_bool(env, COOKIE_SECURE_ENV), true)?;
    let same_site = same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = match mode.settle(required_bool(env, ALLOW_EPHEMERAL_ENV), false)? {
        true if mode == BuildMode::Release => return Err(SessionConfigError::EphemeralNotAllowed),
        flag => flag,
    };
    let ttl = mode.settle(ttl_hours(env), Duration::hours(SESSION_TTL_DEFAULT_HOURS))?;
    let key = session_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl,
    })
}

fn required<E: Env>(env: &E, name: &'static str) -> Result<String, SessionConfigError> {
    env.string(name).ok_or(SessionConfigError::MissingEnv { name })
}

fn required_bool<E: Env>(env: &E, name: &'static str) -> Result<bool, SessionConfigError> {
    let value = required(env, name)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let parsed = required(env, SAMESITE_ENV).and_then(|value| {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            _ => Err(SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value,
                expected: SAMESITE_EXPECTED,
            }),
        }
    });
    let same_site = mode.settle(parsed, SameSite::Lax)?;

    if same_site == SameSite::None && !cookie_secure {
        match mode {
            BuildMode::Release => return Err(SessionConfigError::InsecureSameSiteNone),
            BuildMode::Debug => {
                warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
            }
        }
    }
    Ok(same_site)
}

fn ttl_hours<E: Env>(env: &E) -> Result<Duration, SessionConfigError> {
    let Some(value) = env.string(TTL_ENV) else {
        return Ok(Duration::hours(SESSION_TTL_DEFAULT_HOURS));
    };
    match value.trim().parse::<i64>() {
        Ok(hours) if hours > 0 => Ok(Duration::hours(hours)),
        _ => Err(SessionConfigError::InvalidEnv {
            name: TTL_ENV,
            value,
            expected: TTL_EXPECTED,
        }),
    }
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(source) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(path = %path.display(), error = %source, "using an ephemeral session key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    if bytes.len() < SESSION_KEY_MIN_LEN {
        let short = SessionConfigError::KeyTooShort {
            path,
            length: bytes.len(),
            min_len: SESSION_KEY_MIN_LEN,
        };
        return mode.settle(Err(short), Key::generate());
    }
    Ok(Key::derive_from(&bytes))
}
