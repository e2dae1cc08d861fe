//! Plan generation pipeline
//!
//! One submission runs the whole sequence: validate the request, build the
//! prompt, call the model collaborator, rewrite place-name placeholders into
//! map links, stamp the result. Nothing is cached or retained between
//! submissions.

use chrono::Utc;
use tracing::{debug, info};

use crate::Result;
use crate::error::TripForgeError;
use crate::gemini::PlanGenerator;
use crate::linkify;
use crate::models::{TravelPlan, TripRequest};
use crate::prompt;

/// Service driving one plan generation per request
pub struct PlannerService<G> {
    generator: G,
    temperature: f32,
}

impl<G: PlanGenerator> PlannerService<G> {
    /// Create a service around a generator and a sampling temperature
    pub fn new(generator: G, temperature: f32) -> Self {
        Self {
            generator,
            temperature,
        }
    }

    /// Generate a linkified travel plan for the request.
    ///
    /// Generator failures come back as values with a contextual message;
    /// the caller decides how to present them.
    pub async fn generate_plan(&self, request: &TripRequest) -> Result<TravelPlan> {
        request.validate()?;

        let prompt = prompt::build_prompt(request);
        debug!("Requesting travel plan for: {}", request.destination);

        let raw = self
            .generator
            .generate(&prompt, self.temperature)
            .await
            .map_err(|source| {
                let reason = match source {
                    TripForgeError::Api { message } => message,
                    other => other.to_string(),
                };
                TripForgeError::api(format!("Error generating recommendations: {reason}"))
            })?;

        let markdown = linkify::linkify(&raw);
        info!("Successfully generated travel plan for {}", request.destination);

        Ok(TravelPlan {
            destination: request.destination.clone(),
            markdown,
            generated_at: Utc::now(),
        })
    }

    /// Run the collaborator connectivity check
    pub async fn self_test(&self) -> Result<String> {
        self.generator.self_test().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedGenerator {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl FixedGenerator {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PlanGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str, _temperature: f32) -> crate::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl PlanGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _temperature: f32) -> crate::Result<String> {
            Err(TripForgeError::api("No response received from API"))
        }
    }

    #[tokio::test]
    async fn test_generate_plan_linkifies_model_output() {
        let service = PlannerService::new(
            FixedGenerator::new("Visit [Eiffel Tower](maps) on day one."),
            0.7,
        );
        let request = TripRequest::new("Paris", 2, 3);

        let plan = service.generate_plan(&request).await.unwrap();
        assert_eq!(plan.destination, "Paris");
        assert!(plan.markdown.contains(
            "[Eiffel Tower](https://www.google.com/maps/search/?api=1&query=Eiffel+Tower)"
        ));
        assert!(!plan.markdown.contains("](maps)"));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_the_generator() {
        let generator = FixedGenerator::new("unused");
        let service = PlannerService::new(generator, 0.7);
        let request = TripRequest::new("", 2, 3);

        let err = service.generate_plan(&request).await.unwrap_err();
        assert!(matches!(err, TripForgeError::Validation { .. }));
        assert_eq!(service.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generator_failure_is_wrapped_with_context() {
        let service = PlannerService::new(FailingGenerator, 0.7);
        let request = TripRequest::new("Paris", 2, 3);

        let err = service.generate_plan(&request).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Error generating recommendations"));
        assert!(message.contains("No response received from API"));
    }
}
