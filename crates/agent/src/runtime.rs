use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use stackcoach_core::config::AdvisorConfig;
use stackcoach_core::{
    canonicalize_advisor_stack, Catalog, PrioritySelector, RecommendationItem, RuleEngine,
    ScoreBand, ScoreBreakdown, ScoreCalculator, Stack, UserProfile,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::advisor::{AdvisorClient, AdvisorError, AdvisorRequest, HttpAdvisorClient};

/// Where the stack in a [`Recommendation`] came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StackSource {
    Deterministic,
    Advisor,
    Fallback { reason: String },
}

impl StackSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub request_id: String,
    pub score: ScoreBreakdown,
    pub band: ScoreBand,
    pub stack: Stack,
    pub picks: Vec<RecommendationItem>,
    pub source: StackSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub unresolved: Vec<String>,
    pub total_price: Decimal,
}

enum AdvisorSlot {
    Disabled,
    Unavailable { reason: &'static str },
    Ready { client: Arc<dyn AdvisorClient>, timeout: Duration },
}

pub struct RecommendationRuntime {
    catalog: Arc<Catalog>,
    advisor: AdvisorSlot,
}

impl RecommendationRuntime {
    /// Deterministic engines only.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, advisor: AdvisorSlot::Disabled }
    }

    pub fn with_advisor(mut self, client: Arc<dyn AdvisorClient>, timeout: Duration) -> Self {
        self.advisor = AdvisorSlot::Ready { client, timeout };
        self
    }

    /// An enabled advisor that cannot be built is kept as unavailable so
    /// every request reports the fallback reason instead of failing.
    pub fn from_config(catalog: Arc<Catalog>, config: &AdvisorConfig) -> Self {
        let runtime = Self::new(catalog);
        if !config.enabled {
            return runtime;
        }

        match HttpAdvisorClient::from_config(config) {
            Ok(client) => {
                let budget = client.call_budget();
                runtime.with_advisor(Arc::new(client), budget)
            }
            Err(error) => runtime.with_unavailable_advisor(&error),
        }
    }

    fn with_unavailable_advisor(mut self, error: &AdvisorError) -> Self {
        warn!(
            event_name = "agent.advisor.unavailable",
            error = %error,
            "advisor enabled but not usable; deterministic stacks will be served"
        );
        self.advisor = AdvisorSlot::Unavailable { reason: error.reason_code() };
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn advisor_enabled(&self) -> bool {
        !matches!(self.advisor, AdvisorSlot::Disabled)
    }

    pub async fn recommend(
        &self,
        profile: &UserProfile,
        prior_result: Option<Value>,
    ) -> Recommendation {
        let request_id = Uuid::new_v4().to_string();
        let score = ScoreCalculator::new().score(profile);
        let picks = PrioritySelector::new(&self.catalog).select(profile);

        let (stack, source, summary) = match &self.advisor {
            AdvisorSlot::Disabled => {
                (self.deterministic_stack(profile), StackSource::Deterministic, None)
            }
            AdvisorSlot::Unavailable { reason } => self.fallback(&request_id, profile, reason),
            AdvisorSlot::Ready { client, timeout } => {
                let request = AdvisorRequest::new(request_id.clone(), profile, prior_result);
                match tokio::time::timeout(*timeout, client.recommend(&request)).await {
                    Ok(Ok(response)) => {
                        let stack = canonicalize_advisor_stack(&response, &self.catalog);
                        if stack.is_empty() {
                            self.fallback(&request_id, profile, "empty_stack")
                        } else {
                            let summary = Some(response.summary.trim().to_string())
                                .filter(|summary| !summary.is_empty());
                            (stack, StackSource::Advisor, summary)
                        }
                    }
                    Ok(Err(error)) => self.fallback(&request_id, profile, error.reason_code()),
                    Err(_) => self.fallback(&request_id, profile, "timeout"),
                }
            }
        };

        let unresolved = stack
            .unresolved_items(&self.catalog)
            .into_iter()
            .map(|item| item.name.clone())
            .collect();
        let total_price = stack.total_price(&self.catalog);

        info!(
            event_name = "agent.recommendation.completed",
            request_id = %request_id,
            goal = %profile.primary_goal,
            total = score.total,
            items = stack.len(),
            source = ?source,
            "recommendation ready"
        );

        Recommendation {
            request_id,
            band: score.band(),
            score,
            stack,
            picks,
            source,
            summary,
            unresolved,
            total_price,
        }
    }

    fn deterministic_stack(&self, profile: &UserProfile) -> Stack {
        RuleEngine::new(&self.catalog).build(profile)
    }

    fn fallback(
        &self,
        request_id: &str,
        profile: &UserProfile,
        reason: &str,
    ) -> (Stack, StackSource, Option<String>) {
        warn!(
            event_name = "agent.advisor.fallback",
            request_id,
            reason,
            "advisor unavailable; serving deterministic stack"
        );
        (
            self.deterministic_stack(profile),
            StackSource::Fallback { reason: reason.to_string() },
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use stackcoach_core::config::AdvisorConfig;
    use stackcoach_core::{
        AdvisorResponse, AdvisorSupplement, Catalog, QuizAnswers, RuleEngine, UserProfile,
    };

    use super::{RecommendationRuntime, StackSource};
    use crate::advisor::{AdvisorClient, AdvisorError, AdvisorRequest};

    fn profile() -> UserProfile {
        UserProfile::try_from(QuizAnswers {
            primary_goal: Some("build-muscle".to_string()),
            sleep_quality: Some(4),
            energy_level: Some(4),
            stress_level: Some(2),
            training_frequency: Some("5-6".to_string()),
            ..QuizAnswers::default()
        })
        .expect("valid profile")
    }

    struct ScriptedAdvisor {
        response: Result<AdvisorResponse, fn() -> AdvisorError>,
        calls: AtomicUsize,
        last_request: Mutex<Option<AdvisorRequest>>,
    }

    impl ScriptedAdvisor {
        fn ok(response: AdvisorResponse) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(response),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        fn failing(error: fn() -> AdvisorError) -> Arc<Self> {
            Arc::new(Self {
                response: Err(error),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl AdvisorClient for ScriptedAdvisor {
        async fn recommend(
            &self,
            request: &AdvisorRequest,
        ) -> Result<AdvisorResponse, AdvisorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut slot) = self.last_request.lock() {
                *slot = Some(request.clone());
            }
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(error) => Err(error()),
            }
        }
    }

    struct StalledAdvisor;

    #[async_trait]
    impl AdvisorClient for StalledAdvisor {
        async fn recommend(
            &self,
            _request: &AdvisorRequest,
        ) -> Result<AdvisorResponse, AdvisorError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(AdvisorResponse::default())
        }
    }

    fn supplement(name: &str) -> AdvisorSupplement {
        AdvisorSupplement { name: name.to_string(), ..AdvisorSupplement::default() }
    }

    #[tokio::test]
    async fn deterministic_runtime_matches_rule_engine() {
        let catalog = Arc::new(Catalog::builtin());
        let runtime = RecommendationRuntime::new(catalog.clone());

        let recommendation = runtime.recommend(&profile(), None).await;

        assert_eq!(recommendation.source, StackSource::Deterministic);
        assert_eq!(recommendation.stack, RuleEngine::new(&catalog).build(&profile()));
        assert_eq!(recommendation.score.total, 84);
        assert_eq!(recommendation.picks.len(), 2);
        assert!(recommendation.unresolved.is_empty());
        assert!(recommendation.total_price > rust_decimal::Decimal::ZERO);
    }

    #[tokio::test]
    async fn advisor_stack_is_canonicalized() {
        let advisor = ScriptedAdvisor::ok(AdvisorResponse {
            supplements: vec![
                supplement("creatine"),
                supplement("fish oil"),
                supplement("Moon Dust"),
            ],
            insights: vec!["Lift heavy.".to_string()],
            summary: "Strength focus".to_string(),
        });
        let runtime = RecommendationRuntime::new(Arc::new(Catalog::builtin()))
            .with_advisor(advisor.clone(), Duration::from_secs(1));

        let recommendation =
            runtime.recommend(&profile(), Some(serde_json::json!({"score": 61}))).await;

        assert_eq!(recommendation.source, StackSource::Advisor);
        assert_eq!(
            recommendation.stack.names(),
            vec!["Creatine Monohydrate", "Omega-3 Fish Oil", "Moon Dust"]
        );
        assert!(recommendation.stack.ai_generated);
        assert_eq!(recommendation.unresolved, vec!["Moon Dust".to_string()]);
        assert_eq!(recommendation.summary.as_deref(), Some("Strength focus"));

        let request = advisor
            .last_request
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .expect("advisor should receive a request");
        assert_eq!(request.primary_goal, "muscle");
        assert_eq!(request.request_id, recommendation.request_id);
        assert!(request.prior_result.is_some());
        assert_eq!(advisor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn advisor_failures_fall_back_with_reason() {
        let runtime = RecommendationRuntime::new(Arc::new(Catalog::builtin()))
            .with_advisor(
                ScriptedAdvisor::failing(|| AdvisorError::Status { status: 502 }),
                Duration::from_secs(1),
            );

        let recommendation = runtime.recommend(&profile(), None).await;

        assert_eq!(
            recommendation.source,
            StackSource::Fallback { reason: "http_status".to_string() }
        );
        assert!(!recommendation.stack.ai_generated);
        assert!(recommendation.stack.contains("Creatine Monohydrate"));
    }

    #[tokio::test]
    async fn empty_advisor_stack_falls_back() {
        let runtime = RecommendationRuntime::new(Arc::new(Catalog::builtin()))
            .with_advisor(ScriptedAdvisor::ok(AdvisorResponse::default()), Duration::from_secs(1));

        let recommendation = runtime.recommend(&profile(), None).await;

        assert_eq!(
            recommendation.source,
            StackSource::Fallback { reason: "empty_stack".to_string() }
        );
        assert!(!recommendation.stack.is_empty());
    }

    #[tokio::test]
    async fn stalled_advisor_times_out() {
        let runtime = RecommendationRuntime::new(Arc::new(Catalog::builtin()))
            .with_advisor(Arc::new(StalledAdvisor), Duration::from_millis(20));

        let recommendation = runtime.recommend(&profile(), None).await;

        assert_eq!(recommendation.source, StackSource::Fallback { reason: "timeout".to_string() });
    }

    #[tokio::test]
    async fn enabled_advisor_without_credentials_reports_missing_config() {
        let config = AdvisorConfig {
            enabled: true,
            base_url: None,
            api_key: None,
            model: "advisor-small".to_string(),
            timeout_secs: 5,
            max_retries: 0,
        };
        let runtime = RecommendationRuntime::from_config(Arc::new(Catalog::builtin()), &config);

        let recommendation = runtime.recommend(&profile(), None).await;

        assert!(runtime.advisor_enabled());
        assert_eq!(
            recommendation.source,
            StackSource::Fallback { reason: "missing_credentials".to_string() }
        );
    }

    #[tokio::test]
    async fn unbuildable_advisor_keeps_its_own_reason() {
        let runtime = RecommendationRuntime::new(Arc::new(Catalog::builtin()))
            .with_unavailable_advisor(&AdvisorError::Transport("tls backend".to_string()));

        let recommendation = runtime.recommend(&profile(), None).await;

        assert!(runtime.advisor_enabled());
        assert_eq!(
            recommendation.source,
            StackSource::Fallback { reason: "transport".to_string() }
        );
        assert!(recommendation.stack.contains("Creatine Monohydrate"));
    }
}
