use cliplens_core::{
    Content, GenerationConfig, GenerationRequest, GenerationResponse, ProviderError,
    ProviderResult,
};
use serde::Serialize;

use crate::client::GeminiClient;
use crate::error::{check_response, transport};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    generation_config: &'a GenerationConfig,
}

impl GeminiClient {
    fn generate_path(&self) -> String {
        let model = self.model().trim_start_matches("models/");
        format!("models/{}:generateContent", model)
    }

    pub(crate) async fn generate_content(
        &self,
        request: GenerationRequest,
    ) -> ProviderResult<GenerationResponse> {
        let body = GenerateContentRequest {
            contents: request.contents(),
            generation_config: &request.config,
        };

        tracing::debug!(
            model = %self.model(),
            turns = body.contents.len(),
            "Calling Gemini generateContent"
        );

        let response = self
            .authorized(self.http_client.post(self.api_url(&self.generate_path())))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let response = check_response(response, "generate_content").await?;

        let generated: GenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        if let Some(usage) = &generated.usage_metadata {
            tracing::debug!(
                prompt_tokens = ?usage.prompt_token_count,
                candidate_tokens = ?usage.candidates_token_count,
                total_tokens = ?usage.total_token_count,
                "Gemini generation usage"
            );
        }

        Ok(generated)
    }
}
