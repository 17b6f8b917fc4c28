/// Decoration appended to every provider reply.
pub const REPLY_SUFFIX: &str = " 🤖";

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "Eres un asistente personal amigable y útil. Responde de manera concisa pero amable.";

pub const WELCOME_TEXT: &str = "¡Bienvenido! Soy tu asistente de IA profesional. \
Estoy aquí para brindarte respuestas precisas y asistencia personalizada. \
¿En qué puedo ayudarte hoy?";

/// Rendered by the client whenever a turn fails, whatever the cause.
pub const APOLOGY_TEXT: &str = "Disculpa, experimenté una dificultad técnica. \
Por favor, inténtalo nuevamente. Mi sistema está optimizado para brindarte la mejor experiencia.";

/// Settings for the upstream chat-completion provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub api_base: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound on one provider call; `None` leaves it to the transport
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Groq,
            model: "gemma2-9b-it".to_string(),
            api_key: String::new(),
            api_base: None,
            max_tokens: 150,
            temperature: 0.7,
            timeout_secs: Some(30),
        }
    }
}

impl ProviderConfig {
    pub fn base_url(&self) -> String {
        let base = self
            .api_base
            .clone()
            .unwrap_or_else(|| self.provider.default_base_url().to_string());
        base.trim_end_matches('/').to_string()
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// OpenAI-compatible providers with a known base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    OpenAI,
    DeepSeek,
    Custom,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &str {
        match self {
            ProviderKind::Groq => "https://api.groq.com/openai",
            ProviderKind::OpenAI => "https://api.openai.com",
            ProviderKind::DeepSeek => "https://api.deepseek.com",
            ProviderKind::Custom => "",
        }
    }

    pub fn all() -> &'static [ProviderKind] {
        &[
            ProviderKind::Groq,
            ProviderKind::OpenAI,
            ProviderKind::DeepSeek,
            ProviderKind::Custom,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            ProviderKind::Groq => "Groq",
            ProviderKind::OpenAI => "OpenAI",
            ProviderKind::DeepSeek => "DeepSeek",
            ProviderKind::Custom => "Custom",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ProviderKind::all()
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown provider '{}'", s))
    }
}

/// Browser client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the chat backend, without trailing slash
    pub backend_url: String,
    /// Wait before showing a successful reply
    pub reply_delay_ms: u64,
    /// Wait before showing the apology on failure
    pub failure_delay_ms: u64,
    pub welcome_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:3001".to_string(),
            reply_delay_ms: 1200,
            failure_delay_ms: 1000,
            welcome_delay_ms: 800,
        }
    }
}

impl ClientConfig {
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.backend_url.trim_end_matches('/'))
    }
}
