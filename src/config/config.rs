use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// Provider selector: "groq" or any OpenAI-compatible endpoint ("openai").
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Override for the provider base URL; the factory picks the default per provider.
    pub api_base: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    #[serde(default = "default_max_history_messages")]
    pub max_history_messages: usize,
    /// Replaces the built-in support-agent system prompt when set.
    pub system_prompt: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub chat: ChatConfig,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SUPPORTLINE").separator("__"))
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;

        // Expand environment variables if present like ${GROQ_API_KEY}
        app_config.server.host = expand_env(&app_config.server.host);
        app_config.database.path = expand_env(&app_config.database.path);
        app_config.llm.api_key = expand_env(&app_config.llm.api_key);

        Ok(app_config)
    }

    /// Fail fast on settings the server cannot run without.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "llm.api_key is required (set GROQ_API_KEY and reference it as ${GROQ_API_KEY})"
                    .to_string(),
            ));
        }
        if self.chat.max_message_length == 0 {
            return Err(config::ConfigError::Message(
                "chat.max_message_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn expand_env(val: &str) -> String {
    if val.starts_with("${") && val.ends_with('}') {
        let var_name = &val[2..val.len() - 1];
        std::env::var(var_name).unwrap_or_else(|_| "".to_string())
    } else {
        val.to_string()
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_db_path() -> String {
    "supportline.duckdb".to_string()
}

fn default_provider() -> String {
    "groq".to_string()
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_message_length() -> usize {
    2000
}

fn default_max_history_messages() -> usize {
    10
}
