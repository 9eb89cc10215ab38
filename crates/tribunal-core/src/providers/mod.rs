//! Transport seam to the judge models.
//!
//! The scoring core only ever needs the text a judge returned; everything
//! about HTTP, retries, and rate limiting lives behind this trait. A
//! transport error is a soft failure: the caller records "no score" for that
//! judge and keeps going.

pub mod openai;

use async_trait::async_trait;

#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Full free-text critique, including the embedded score block(s).
    async fn critique(&self, system_prompt: &str, prompt: &str) -> anyhow::Result<String>;

    /// Judge identity as recorded in `Judge Name` fields.
    fn name(&self) -> &str;
}
