use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment,
};
use super::types::{
    ApiSettings, ConfigError, CorsSettings, DemoSettings, RuntimeSettings, ServerHost, ServerPort,
    ServerSettings, Settings, TelemetrySettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("NEXEL_HOST", "0.0.0.0");
        let port = env_or_default("NEXEL_PORT", "8000");

        let environment =
            parse_environment(env_optional("NEXEL_ENV").or_else(|| env_optional("ENVIRONMENT")));

        let project_name = env_or_default("PROJECT_NAME", "Nexel API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let seed_demo =
            env_optional("NEXEL_SEED_DEMO").map(|value| parse_bool(&value)).unwrap_or(false);

        let log_level = env_or_default("NEXEL_LOG_LEVEL", "info");
        let json = env_optional("NEXEL_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        Ok(Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment },
            api: ApiSettings { project_name, version, api_v1_str },
            cors: CorsSettings { origins: cors_origins },
            demo: DemoSettings { seed_demo },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        })
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn demo(&self) -> &DemoSettings {
        &self.demo
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }
}
