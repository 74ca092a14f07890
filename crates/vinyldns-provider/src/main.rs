// # vinyldns-provider
//
// This binary is a THIN integration layer. It is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Building the HTTP client and the resource registry
// 4. Running ONE lifecycle hook against an attribute bag
//
// All VinylDNS logic lives in vinyldns-core.
//
// ## Usage
//
// ```text
// vinyldns-provider create  <type>              < bag.json
// vinyldns-provider read    <type>              < bag.json
// vinyldns-provider update  <type>              < bag.json
// vinyldns-provider delete  <type> [id]         < bag.json   (stdin unused when id is given)
// vinyldns-provider import  <type> <id>
// vinyldns-provider data    <type>              < bag.json
// vinyldns-provider upgrade <type> <version>    < bag.json
// ```
//
// `<type>` is one of `vinyldns_group`, `vinyldns_zone`, `vinyldns_record_set`.
// The bag is `{"id": "...", "attributes": {...}}`; the resulting bag is
// printed to stdout. Logs go to stderr.
//
// ## Configuration
//
// - `VINYLDNS_ACCESS_KEY`: Access key (required)
// - `VINYLDNS_SECRET_KEY`: Secret key (required)
// - `VINYLDNS_HOST`: API base URL, e.g. http://localhost:9000 (required)
// - `VINYLDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
// - `VINYLDNS_POLL_TIMEOUT_SECS`: Change wait ceiling (default: 1800)
// - `VINYLDNS_POLL_INTERVAL_MS`: Change poll cadence (default: 500)
//
// ## Example
//
// ```bash
// export VINYLDNS_ACCESS_KEY=okAccessKey
// export VINYLDNS_SECRET_KEY=okSecretKey
// export VINYLDNS_HOST=http://localhost:9000
//
// echo '{"attributes": {"name": "ok.", "email": "ok@example.com", "admin_group_id": "g1"}}' \
//     | vinyldns-provider create vinyldns_zone
// ```

use anyhow::Result;
use std::env;
use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use vinyldns_client::VinylDnsClient;
use vinyldns_core::provider::{build_registry, import};
use vinyldns_core::{PollSettings, ProviderConfig, ProviderRegistry, ResourceData};

/// Exit codes for different termination scenarios
///
/// - 0: Hook completed
/// - 1: Usage, configuration or input error
/// - 2: Runtime error (the hook failed)
#[derive(Debug, Clone, Copy)]
enum ProviderExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<ProviderExitCode> for ExitCode {
    fn from(code: ProviderExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    access_key: String,
    secret_key: String,
    host: Option<String>,
    log_level: String,
    poll_timeout_secs: Option<u64>,
    poll_interval_ms: Option<u64>,
}

// Custom Debug implementation that hides the secret key
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<REDACTED>")
            .field("host", &self.host)
            .field("log_level", &self.log_level)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            access_key: lookup("VINYLDNS_ACCESS_KEY").unwrap_or_default(),
            secret_key: lookup("VINYLDNS_SECRET_KEY").unwrap_or_default(),
            host: lookup("VINYLDNS_HOST").filter(|h| !h.is_empty()),
            log_level: lookup("VINYLDNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            poll_timeout_secs: parse_number(&lookup, "VINYLDNS_POLL_TIMEOUT_SECS")?,
            poll_interval_ms: parse_number(&lookup, "VINYLDNS_POLL_INTERVAL_MS")?,
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.access_key.is_empty() {
            anyhow::bail!(
                "VINYLDNS_ACCESS_KEY is required. \
                Set it via: export VINYLDNS_ACCESS_KEY=your_access_key"
            );
        }

        if self.secret_key.is_empty() {
            anyhow::bail!(
                "VINYLDNS_SECRET_KEY is required. \
                Set it via: export VINYLDNS_SECRET_KEY=your_secret_key"
            );
        }

        if self.host.is_none() {
            anyhow::bail!(
                "VINYLDNS_HOST is required. \
                Set it via: export VINYLDNS_HOST=http://localhost:9000"
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "VINYLDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.provider_config().validate()?;
        Ok(())
    }

    fn provider_config(&self) -> ProviderConfig {
        let mut poll = PollSettings::default();
        if let Some(timeout) = self.poll_timeout_secs {
            poll.timeout_secs = timeout;
        }
        if let Some(interval) = self.poll_interval_ms {
            poll.poll_interval_ms = interval;
        }

        ProviderConfig {
            poll,
            ..ProviderConfig::new(
                self.access_key.as_str(),
                self.secret_key.as_str(),
                self.host.clone(),
            )
        }
    }

    fn log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn parse_number(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{key} must be a non-negative integer. Got: {raw}")),
    }
}

/// One lifecycle hook invocation
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Create(String),
    Read(String),
    Update(String),
    Delete(String, Option<String>),
    Import(String, String),
    Data(String),
    Upgrade(String, u32),
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let command = match args.as_slice() {
            ["create", type_name] => Self::Create(type_name.to_string()),
            ["read", type_name] => Self::Read(type_name.to_string()),
            ["update", type_name] => Self::Update(type_name.to_string()),
            ["delete", type_name] => Self::Delete(type_name.to_string(), None),
            ["delete", type_name, id] => Self::Delete(type_name.to_string(), Some(id.to_string())),
            ["import", type_name, id] => Self::Import(type_name.to_string(), id.to_string()),
            ["data", type_name] => Self::Data(type_name.to_string()),
            ["upgrade", type_name, version] => {
                let version = version.parse().map_err(|_| {
                    anyhow::anyhow!("schema version must be a non-negative integer. Got: {version}")
                })?;
                Self::Upgrade(type_name.to_string(), version)
            }
            _ => anyhow::bail!(
                "usage: vinyldns-provider <create|read|update|delete|import|data|upgrade> <type> [id|version]"
            ),
        };

        Ok(command)
    }

    /// Whether the attribute bag is read from stdin
    fn reads_input(&self) -> bool {
        !matches!(self, Self::Import(..) | Self::Delete(_, Some(_)))
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            return ProviderExitCode::ConfigError.into();
        }
    };

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ProviderExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return ProviderExitCode::ConfigError.into();
    }

    // Logs go to stderr; stdout carries only the resulting bag
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ProviderExitCode::ConfigError.into();
    }

    let input = if command.reads_input() {
        match read_input() {
            Ok(data) => data,
            Err(e) => {
                error!("Invalid input: {}", e);
                return ProviderExitCode::ConfigError.into();
            }
        }
    } else {
        ResourceData::default()
    };

    let provider_config = config.provider_config();
    let client = match VinylDnsClient::from_config(&provider_config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create VinylDNS client: {}", e);
            return ProviderExitCode::ConfigError.into();
        }
    };
    let registry = build_registry(Arc::new(client), provider_config.poll);

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ProviderExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        tokio::select! {
            outcome = run(command, &registry, input) => outcome,
            _ = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("interrupted")),
        }
    });

    match result.and_then(|data| Ok(serde_json::to_string_pretty(&data)?)) {
        Ok(json) => {
            println!("{}", json);
            ProviderExitCode::Success.into()
        }
        Err(e) => {
            error!("{:#}", e);
            ProviderExitCode::RuntimeError.into()
        }
    }
}

fn read_input() -> Result<ResourceData> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    if raw.trim().is_empty() {
        anyhow::bail!("expected an attribute bag on stdin");
    }
    Ok(serde_json::from_str(&raw)?)
}

/// Run the hook selected by `command`
async fn run(
    command: Command,
    registry: &ProviderRegistry,
    mut data: ResourceData,
) -> Result<ResourceData> {
    match command {
        Command::Create(type_name) => {
            info!("create {}", type_name);
            registry.resource(&type_name)?.create(&mut data).await?;
        }
        Command::Read(type_name) => {
            info!("read {} {}", type_name, data.id());
            registry.resource(&type_name)?.read(&mut data).await?;
        }
        Command::Update(type_name) => {
            info!("update {} {}", type_name, data.id());
            registry.resource(&type_name)?.update(&mut data).await?;
        }
        Command::Delete(type_name, id) => {
            if let Some(id) = id {
                data.set_id(id);
            }
            info!("delete {} {}", type_name, data.id());
            registry.resource(&type_name)?.delete(&mut data).await?;
        }
        Command::Import(type_name, id) => {
            data = import(registry, &type_name, &id).await?;
        }
        Command::Data(type_name) => {
            info!("data source {}", type_name);
            registry.data_source(&type_name)?.read(&mut data).await?;
        }
        Command::Upgrade(type_name, version) => {
            info!("upgrade {} state from version {}", type_name, version);
            data = registry.resource(&type_name)?.upgrade_state(version, data)?;
        }
    }

    Ok(data)
}
