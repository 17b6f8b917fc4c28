//! Server configuration, parsed from flags with environment fallbacks.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use chat_core::ports::CompletionPort;
use chat_core::resolver::ReplyResolver;
use chat_types::config::{ProviderConfig, ProviderKind, DEFAULT_SYSTEM_PROMPT};

/// Runtime configuration for chat-server.
///
/// Every field has a default so the server starts without any environment;
/// without an API key all replies come from the local fallback.
#[derive(Debug, Clone, Parser)]
#[command(name = "chat-server", version, about)]
pub struct Config {
    /// Full bind address; overrides `--port` when set.
    #[arg(long, env = "CHAT_HTTP_ADDR")]
    pub http_addr: Option<String>,

    #[arg(long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Bearer credential for the provider.
    #[arg(long, env = "GROQ_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "CHAT_PROVIDER", default_value = "groq")]
    pub provider: ProviderKind,

    /// Provider base URL, e.g. `https://api.groq.com/openai`.
    #[arg(long, env = "CHAT_API_BASE")]
    pub api_base: Option<String>,

    #[arg(long, env = "CHAT_MODEL", default_value = "gemma2-9b-it")]
    pub model: String,

    #[arg(long, env = "CHAT_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(long, env = "CHAT_MAX_TOKENS", default_value_t = 150)]
    pub max_tokens: u32,

    #[arg(long, env = "CHAT_SYSTEM_PROMPT", default_value = DEFAULT_SYSTEM_PROMPT)]
    pub system_prompt: String,

    /// Per-call provider timeout in seconds; 0 disables it.
    #[arg(long, env = "CHAT_PROVIDER_TIMEOUT_SECS", default_value_t = 30)]
    pub provider_timeout_secs: u64,

    /// Artificial pause before answering `POST /chat`.
    #[arg(long, env = "CHAT_REPLY_DELAY_MS", default_value_t = 300)]
    pub reply_delay_ms: u64,

    /// Comma-separated allowed origins; any origin when unset.
    #[arg(long, env = "CHAT_CORS_ORIGINS")]
    pub cors_origins: Option<String>,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    #[arg(long, env = "CHAT_LOG", default_value = "info")]
    pub log_level: String,

    /// Emit log records as newline-delimited JSON.
    #[arg(long, env = "CHAT_LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn bind_address(&self) -> String {
        self.http_addr
            .clone()
            .unwrap_or_else(|| format!("0.0.0.0:{}", self.port))
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider,
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout_secs: (self.provider_timeout_secs > 0).then_some(self.provider_timeout_secs),
        }
    }

    /// Resolver that sends the configured system prompt with every call.
    pub fn resolver(&self, provider: Arc<dyn CompletionPort>) -> ReplyResolver {
        ReplyResolver::new(provider, self.system_prompt.clone())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chat_types::ProviderError;

    /// Variables clap falls back to; cleared so the shell cannot leak in.
    const ENV_VARS: &[&str] = &[
        "CHAT_HTTP_ADDR",
        "PORT",
        "GROQ_API_KEY",
        "CHAT_PROVIDER",
        "CHAT_API_BASE",
        "CHAT_MODEL",
        "CHAT_TEMPERATURE",
        "CHAT_MAX_TOKENS",
        "CHAT_SYSTEM_PROMPT",
        "CHAT_PROVIDER_TIMEOUT_SECS",
        "CHAT_REPLY_DELAY_MS",
        "CHAT_CORS_ORIGINS",
        "CHAT_LOG",
        "CHAT_LOG_JSON",
    ];

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn try_parse(args: &[&str]) -> Result<Config, clap::Error> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
        let mut argv = vec!["chat-server"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv)
    }

    fn parse(args: &[&str]) -> Config {
        try_parse(args).unwrap()
    }

    /// Defaults, built without touching argv or the environment.
    fn config() -> Config {
        Config {
            http_addr: None,
            port: 3001,
            api_key: String::new(),
            provider: ProviderKind::Groq,
            api_base: None,
            model: "gemma2-9b-it".to_string(),
            temperature: 0.7,
            max_tokens: 150,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            provider_timeout_secs: 30,
            reply_delay_ms: 300,
            cors_origins: None,
            log_level: "info".to_string(),
            log_json: false,
        }
    }

    #[test]
    fn http_addr_overrides_port() {
        let cfg = Config {
            port: 8080,
            http_addr: Some("127.0.0.1:9000".to_string()),
            ..config()
        };
        assert_eq!(cfg.bind_address(), "127.0.0.1:9000");
    }

    #[test]
    fn port_builds_wildcard_address() {
        let cfg = Config {
            port: 8080,
            ..config()
        };
        assert_eq!(cfg.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let cfg = parse(&[]);
        assert_eq!(cfg.bind_address(), "0.0.0.0:3001");
        assert_eq!(cfg.provider, ProviderKind::Groq);
        assert_eq!(cfg.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(cfg.reply_delay(), Duration::from_millis(300));
        assert_eq!(cfg.provider_config().timeout_secs, Some(30));
        assert!(!cfg.provider_config().has_credential());
        assert!(!cfg.log_json);
    }

    #[test]
    fn provider_config_from_flags() {
        let cfg = parse(&[
            "--provider",
            "openai",
            "--model",
            "gpt-4o-mini",
            "--api-key",
            "sk-test",
            "--api-base",
            "http://localhost:9999",
            "--max-tokens",
            "64",
            "--temperature",
            "0.2",
            "--provider-timeout-secs",
            "0",
        ]);
        let provider = cfg.provider_config();
        assert_eq!(provider.provider, ProviderKind::OpenAI);
        assert_eq!(provider.model, "gpt-4o-mini");
        assert_eq!(provider.api_key, "sk-test");
        assert_eq!(provider.base_url(), "http://localhost:9999");
        assert_eq!(provider.max_tokens, 64);
        assert!((provider.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(provider.timeout_secs, None);
    }

    #[test]
    fn unknown_provider_rejected() {
        assert!(try_parse(&["--provider", "nope"]).is_err());
    }

    #[test]
    fn reply_delay_from_flag() {
        let cfg = parse(&["--reply-delay-ms", "0"]);
        assert!(cfg.reply_delay().is_zero());
    }

    struct RecordingProvider {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionPort for RecordingProvider {
        async fn complete(&self, system_prompt: &str, _user_text: &str) -> Result<String, ProviderError> {
            self.prompts.lock().unwrap().push(system_prompt.to_string());
            Ok("listo".to_string())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn resolver_uses_configured_system_prompt() {
        let cfg = Config {
            system_prompt: "Responde solo en verso.".to_string(),
            ..config()
        };
        let provider = Arc::new(RecordingProvider {
            prompts: Mutex::new(Vec::new()),
        });
        cfg.resolver(provider.clone()).resolve("hola").await.unwrap();
        assert_eq!(
            provider.prompts.lock().unwrap().as_slice(),
            &["Responde solo en verso.".to_string()]
        );
    }
}
