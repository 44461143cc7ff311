use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::auth::repo::{PgUserStore, UserStore};
use crate::config::{AppConfig, DbConfig};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Builds the Postgres-backed state. Connections are opened on demand,
    /// so startup does not need the database to be reachable.
    pub fn init(config: AppConfig) -> Self {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy_with(connect_options(&config.db));

        let store = Arc::new(PgUserStore::new(db)) as Arc<dyn UserStore>;
        Self::from_parts(store, Arc::new(config))
    }

    pub fn from_parts(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }
}

fn connect_options(db: &DbConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .database(&db.database)
        .username(&db.user)
        .password(&db.password)
}

#[cfg(test)]
impl AppState {
    pub fn fake(store: Arc<dyn UserStore>) -> Self {
        let config = AppConfig::from_lookup(|_| None).expect("default config");
        Self::from_parts(store, Arc::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_follow_config() {
        let config = AppConfig::from_lookup(|k| match k {
            "DB_HOST" => Some("db.internal".into()),
            "DB_PORT" => Some("6543".into()),
            "DB_DATABASE" => Some("accounts".into()),
            _ => None,
        })
        .unwrap();
        let opts = connect_options(&config.db);
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 6543);
        assert_eq!(opts.get_database(), Some("accounts"));
        assert_eq!(opts.get_username(), "admin");
    }

    #[tokio::test]
    async fn init_succeeds_with_unreachable_database() {
        // nothing listens on port 1; init must still hand back a state
        let config = AppConfig::from_lookup(|k| match k {
            "DB_HOST" => Some("127.0.0.1".into()),
            "DB_PORT" => Some("1".into()),
            _ => None,
        })
        .unwrap();
        let state = AppState::init(config);
        assert_eq!(state.config.db.host, "127.0.0.1");
        assert_eq!(state.config.db.port, 1);
    }
}
