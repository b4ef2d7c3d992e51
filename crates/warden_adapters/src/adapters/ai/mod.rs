//! AI and machine-learning service adapters.

mod anthropic;
mod cohere;
mod deepseek;
mod elevenlabs;
mod fireworks;
mod gemini;
mod groq;
mod huggingface;
mod mistral;
mod openai;
mod openrouter;
mod perplexity;
mod replicate;
mod together;
mod xai;

pub use anthropic::AnthropicAdapter;
pub use cohere::CohereAdapter;
pub use deepseek::DeepSeekAdapter;
pub use elevenlabs::ElevenLabsAdapter;
pub use fireworks::FireworksAdapter;
pub use gemini::GeminiAdapter;
pub use groq::GroqAdapter;
pub use huggingface::HuggingFaceAdapter;
pub use mistral::MistralAdapter;
pub use openai::OpenAiAdapter;
pub use openrouter::OpenRouterAdapter;
pub use perplexity::PerplexityAdapter;
pub use replicate::ReplicateAdapter;
pub use together::TogetherAdapter;
pub use xai::XaiAdapter;
