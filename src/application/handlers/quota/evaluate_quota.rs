//! EvaluateQuotaHandler - the single "may user U perform action A" decision.
//!
//! Read-only: looks up the subscription, checks the plan's feature
//! flags, counts this calendar month's ledger entries, and compares
//! against the plan ceiling. Recording usage is `RecordUsageHandler`'s
//! job, invoked by the caller only after the gated action succeeds, so
//! a failed generation never consumes quota.
//!
//! Admin-role bypass is the caller's concern: wrap this handler, do not
//! branch on roles inside it.
//!
//! Two concurrent requests near the ceiling can both read `count =
//! limit - 1` and both be admitted; the overshoot is bounded by the
//! number of in-flight requests and accepted for these soft product
//! quotas. Deployments needing hard enforcement should wrap the count
//! and the subsequent append in one serializable per-user transaction.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::plan::{MonthlyLimit, Plan};
use crate::domain::subscription::SubscriptionStatus;
use crate::domain::usage::ActionKind;
use crate::ports::{PlanCatalog, SubscriptionStore, UsageLedger};
use crate::domain::foundation::Timestamp;

/// Retry hint paired with `MonthlyLimitExceeded` responses. The quota
/// resets on a monthly boundary, not a rolling one, so a fixed 24-hour
/// hint is as precise as the caller needs.
pub const LIMIT_RETRY_HINT: Duration = Duration::from_secs(24 * 60 * 60);

/// Query to gate one action for one user.
#[derive(Debug, Clone)]
pub struct EvaluateQuotaQuery {
    pub user_id: UserId,
    pub action: ActionKind,
}

/// A positive gate decision with the usage snapshot it was based on.
#[derive(Debug, Clone)]
pub struct QuotaDecision {
    /// The plan the decision was made under.
    pub plan: Plan,
    /// Ledger entries this calendar month at decision time.
    pub usage_count: u64,
    /// The ceiling in effect.
    pub limit: MonthlyLimit,
}

/// Why the gate said no.
///
/// Every variant is caller-distinguishable: the HTTP layer maps
/// not-allowed/inactive to 403 and limit-exceeded to 429.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaError {
    /// User has no subscription row. Bootstrap should have created one;
    /// treat as a data-integrity anomaly and log loudly.
    NoSubscription(UserId),

    /// Subscription exists but its status does not pass the gate.
    SubscriptionNotActive(SubscriptionStatus),

    /// The plan does not include the requested feature. The message is
    /// safe to render to the end user verbatim.
    FeatureNotAllowed(ActionKind),

    /// The calendar-month ceiling is reached. Carries nothing extra;
    /// callers re-derive usage numbers for the response body.
    MonthlyLimitExceeded,

    /// The store could not be read.
    Infrastructure(String),
}

impl QuotaError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            QuotaError::NoSubscription(_) => ErrorCode::SubscriptionNotFound,
            QuotaError::SubscriptionNotActive(_) => ErrorCode::SubscriptionNotActive,
            QuotaError::FeatureNotAllowed(_) => ErrorCode::FeatureNotAllowed,
            QuotaError::MonthlyLimitExceeded => ErrorCode::QuotaExceeded,
            QuotaError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-presentable message.
    pub fn message(&self) -> String {
        match self {
            QuotaError::NoSubscription(user_id) => {
                format!("No subscription found for user: {}", user_id)
            }
            QuotaError::SubscriptionNotActive(status) => {
                format!("Subscription is not active (status: {})", status)
            }
            QuotaError::FeatureNotAllowed(action) => {
                format!("{} is not available in your current plan", action.display_name())
            }
            QuotaError::MonthlyLimitExceeded => {
                "Monthly request limit reached".to_string()
            }
            QuotaError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// How long the caller should suggest waiting, if retrying can help.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            QuotaError::MonthlyLimitExceeded => Some(LIMIT_RETRY_HINT),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuotaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for QuotaError {}

impl From<DomainError> for QuotaError {
    fn from(err: DomainError) -> Self {
        QuotaError::Infrastructure(err.to_string())
    }
}

/// The quota gate.
///
/// Evaluation order is fixed: subscription status short-circuits before
/// any catalog or ledger read, and the feature check precedes the count
/// so a disallowed action never pays for a ledger scan.
pub struct EvaluateQuotaHandler {
    subscriptions: Arc<dyn SubscriptionStore>,
    catalog: Arc<dyn PlanCatalog>,
    ledger: Arc<dyn UsageLedger>,
}

impl EvaluateQuotaHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        catalog: Arc<dyn PlanCatalog>,
        ledger: Arc<dyn UsageLedger>,
    ) -> Self {
        Self {
            subscriptions,
            catalog,
            ledger,
        }
    }

    pub async fn handle(&self, query: EvaluateQuotaQuery) -> Result<QuotaDecision, QuotaError> {
        // 1. Subscription lookup.
        let subscription = self
            .subscriptions
            .find_by_user(&query.user_id)
            .await?
            .ok_or_else(|| {
                tracing::error!(user_id = %query.user_id, "user has no subscription row");
                QuotaError::NoSubscription(query.user_id.clone())
            })?;

        // 2. Status gate, before anything is counted.
        if !subscription.status.is_usable() {
            return Err(QuotaError::SubscriptionNotActive(subscription.status));
        }

        // 3. Feature flag for the requested action.
        let plan = self.catalog.features_of(subscription.tier).await?;
        if let Some(required) = query.action.required_feature() {
            if !required.is_granted_by(&plan.features) {
                tracing::debug!(
                    user_id = %query.user_id,
                    action = %query.action,
                    tier = %plan.tier,
                    "action not included in plan"
                );
                return Err(QuotaError::FeatureNotAllowed(query.action));
            }
        }

        // 4. Usage this calendar month (not the billing anchor).
        let month_start = Timestamp::now().start_of_month();
        let usage_count = self
            .ledger
            .count_since(&query.user_id, month_start)
            .await?;

        // 5. Ceiling check; exact boundary, unlimited always passes.
        let limit = plan.monthly_request_limit();
        if limit.is_exceeded_by(usage_count) {
            tracing::info!(
                user_id = %query.user_id,
                usage_count,
                limit = %limit,
                "monthly request limit reached"
            );
            return Err(QuotaError::MonthlyLimitExceeded);
        }

        Ok(QuotaDecision {
            plan,
            usage_count,
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::PlanTier;
    use crate::domain::subscription::Subscription;
    use crate::domain::usage::UsageEntry;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockSubscriptionStore {
        subscription: Option<Subscription>,
        fail_read: bool,
    }

    impl MockSubscriptionStore {
        fn with(subscription: Subscription) -> Self {
            Self {
                subscription: Some(subscription),
                fail_read: false,
            }
        }

        fn empty() -> Self {
            Self {
                subscription: None,
                fail_read: false,
            }
        }

        fn failing() -> Self {
            Self {
                subscription: None,
                fail_read: true,
            }
        }
    }

    #[async_trait]
    impl SubscriptionStore for MockSubscriptionStore {
        async fn find_by_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<Subscription>, DomainError> {
            if self.fail_read {
                return Err(DomainError::database("Simulated read failure"));
            }
            Ok(self.subscription.clone())
        }

        async fn insert(&self, _subscription: &Subscription) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update_status(
            &self,
            _user_id: &UserId,
            _status: SubscriptionStatus,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn count_active_paid(&self) -> Result<u64, DomainError> {
            Ok(0)
        }
    }

    struct MockPlanCatalog {
        plan: Plan,
        lookups: AtomicUsize,
    }

    impl MockPlanCatalog {
        fn with(plan: Plan) -> Self {
            Self {
                plan,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PlanCatalog for MockPlanCatalog {
        async fn features_of(&self, _tier: PlanTier) -> Result<Plan, DomainError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.plan.clone())
        }
    }

    struct MockUsageLedger {
        count: AtomicU64,
        count_reads: AtomicUsize,
    }

    impl MockUsageLedger {
        fn with_count(count: u64) -> Self {
            Self {
                count: AtomicU64::new(count),
                count_reads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl UsageLedger for MockUsageLedger {
        async fn append(&self, _entry: &UsageEntry) -> Result<(), DomainError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn count_since(
            &self,
            _user_id: &UserId,
            _since: Timestamp,
        ) -> Result<u64, DomainError> {
            self.count_reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.count.load(Ordering::SeqCst))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn test_user_id() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    fn active_subscription(tier: PlanTier) -> Subscription {
        let mut sub = Subscription::default_free(test_user_id());
        sub.tier = tier;
        sub
    }

    fn handler(
        store: MockSubscriptionStore,
        catalog: MockPlanCatalog,
        ledger: MockUsageLedger,
    ) -> EvaluateQuotaHandler {
        EvaluateQuotaHandler::new(Arc::new(store), Arc::new(catalog), Arc::new(ledger))
    }

    fn query(action: ActionKind) -> EvaluateQuotaQuery {
        EvaluateQuotaQuery {
            user_id: test_user_id(),
            action,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn free_user_under_limit_is_allowed() {
        let h = handler(
            MockSubscriptionStore::with(active_subscription(PlanTier::Free)),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Free)),
            MockUsageLedger::with_count(49),
        );

        let decision = h.handle(query(ActionKind::Chat)).await.unwrap();
        assert_eq!(decision.usage_count, 49);
        assert_eq!(decision.limit, MonthlyLimit::Limited(50));
        assert_eq!(decision.plan.tier, PlanTier::Free);
    }

    #[tokio::test]
    async fn unlimited_plan_is_allowed_at_any_count() {
        let h = handler(
            MockSubscriptionStore::with(active_subscription(PlanTier::Enterprise)),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Enterprise)),
            MockUsageLedger::with_count(1_000_000),
        );

        let decision = h.handle(query(ActionKind::VideoGeneration)).await.unwrap();
        assert_eq!(decision.limit, MonthlyLimit::Unlimited);
    }

    #[tokio::test]
    async fn search_requires_no_feature_flag() {
        let h = handler(
            MockSubscriptionStore::with(active_subscription(PlanTier::Free)),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Free)),
            MockUsageLedger::with_count(0),
        );

        assert!(h.handle(query(ActionKind::Search)).await.is_ok());
    }

    #[tokio::test]
    async fn feature_gating_is_per_action() {
        // Image off, video on: image fails, video passes, same user.
        let mut plan = Plan::default_for_tier(PlanTier::Pro);
        plan.features.allow_image_generation = false;
        plan.features.allow_video_generation = true;

        let h = handler(
            MockSubscriptionStore::with(active_subscription(PlanTier::Pro)),
            MockPlanCatalog::with(plan),
            MockUsageLedger::with_count(0),
        );

        let image = h.handle(query(ActionKind::ImageGeneration)).await;
        assert_eq!(
            image.unwrap_err(),
            QuotaError::FeatureNotAllowed(ActionKind::ImageGeneration)
        );

        let video = h.handle(query(ActionKind::VideoGeneration)).await;
        assert!(video.is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_subscription_fails_distinctly() {
        let h = handler(
            MockSubscriptionStore::empty(),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Free)),
            MockUsageLedger::with_count(0),
        );

        let err = h.handle(query(ActionKind::Chat)).await.unwrap_err();
        assert!(matches!(err, QuotaError::NoSubscription(_)));
        assert_eq!(err.code(), ErrorCode::SubscriptionNotFound);
    }

    #[tokio::test]
    async fn inactive_subscription_fails_with_concrete_status() {
        let mut sub = active_subscription(PlanTier::Pro);
        sub.status = SubscriptionStatus::Canceled;

        let h = handler(
            MockSubscriptionStore::with(sub),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Pro)),
            MockUsageLedger::with_count(0),
        );

        let err = h.handle(query(ActionKind::Chat)).await.unwrap_err();
        assert_eq!(
            err,
            QuotaError::SubscriptionNotActive(SubscriptionStatus::Canceled)
        );
        assert!(err.message().contains("canceled"));
    }

    #[tokio::test]
    async fn past_due_is_distinguishable_from_canceled() {
        let mut sub = active_subscription(PlanTier::Pro);
        sub.status = SubscriptionStatus::PastDue;

        let h = handler(
            MockSubscriptionStore::with(sub),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Pro)),
            MockUsageLedger::with_count(0),
        );

        let err = h.handle(query(ActionKind::Chat)).await.unwrap_err();
        assert!(err.message().contains("past_due"));
    }

    #[tokio::test]
    async fn status_failure_skips_catalog_and_ledger_reads() {
        let mut sub = active_subscription(PlanTier::Pro);
        sub.status = SubscriptionStatus::Inactive;

        let catalog = Arc::new(MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Pro)));
        let ledger = Arc::new(MockUsageLedger::with_count(0));
        let h = EvaluateQuotaHandler::new(
            Arc::new(MockSubscriptionStore::with(sub)),
            catalog.clone(),
            ledger.clone(),
        );

        let _ = h.handle(query(ActionKind::Chat)).await;
        assert_eq!(catalog.lookups.load(Ordering::SeqCst), 0);
        assert_eq!(ledger.count_reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn feature_not_allowed_message_is_user_presentable() {
        let h = handler(
            MockSubscriptionStore::with(active_subscription(PlanTier::Free)),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Free)),
            MockUsageLedger::with_count(0),
        );

        let err = h.handle(query(ActionKind::VideoGeneration)).await.unwrap_err();
        assert_eq!(
            err.message(),
            "Video generation is not available in your current plan"
        );
    }

    #[tokio::test]
    async fn limit_boundary_is_exact() {
        // count == limit fails, count == limit - 1 succeeds.
        let at_limit = handler(
            MockSubscriptionStore::with(active_subscription(PlanTier::Free)),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Free)),
            MockUsageLedger::with_count(50),
        );
        assert_eq!(
            at_limit.handle(query(ActionKind::Chat)).await.unwrap_err(),
            QuotaError::MonthlyLimitExceeded
        );

        let under_limit = handler(
            MockSubscriptionStore::with(active_subscription(PlanTier::Free)),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Free)),
            MockUsageLedger::with_count(49),
        );
        assert!(under_limit.handle(query(ActionKind::Chat)).await.is_ok());
    }

    #[tokio::test]
    async fn limit_exceeded_carries_retry_hint() {
        let err = QuotaError::MonthlyLimitExceeded;
        assert_eq!(err.retry_after(), Some(LIMIT_RETRY_HINT));
        assert_eq!(err.code(), ErrorCode::QuotaExceeded);

        let other = QuotaError::FeatureNotAllowed(ActionKind::ProMode);
        assert_eq!(other.retry_after(), None);
    }

    #[tokio::test]
    async fn evaluate_then_record_then_evaluate_hits_the_ceiling() {
        // The §8 scenario: 49 of 50 used, one chat allowed, the recorded
        // usage pushes the next evaluate over the line.
        let store = Arc::new(MockSubscriptionStore::with(active_subscription(PlanTier::Free)));
        let catalog = Arc::new(MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Free)));
        let ledger = Arc::new(MockUsageLedger::with_count(49));
        let h = EvaluateQuotaHandler::new(store, catalog, ledger.clone());

        let first = h.handle(query(ActionKind::Chat)).await.unwrap();
        assert_eq!(first.usage_count, 49);

        let entry = UsageEntry::new(
            test_user_id(),
            ActionKind::Chat,
            crate::domain::usage::UsageMetadata::default(),
        );
        ledger.append(&entry).await.unwrap();

        let second = h.handle(query(ActionKind::Chat)).await;
        assert_eq!(second.unwrap_err(), QuotaError::MonthlyLimitExceeded);
    }

    #[tokio::test]
    async fn store_failure_propagates_as_infrastructure() {
        let h = handler(
            MockSubscriptionStore::failing(),
            MockPlanCatalog::with(Plan::default_for_tier(PlanTier::Free)),
            MockUsageLedger::with_count(0),
        );

        let err = h.handle(query(ActionKind::Chat)).await.unwrap_err();
        assert!(matches!(err, QuotaError::Infrastructure(_)));
    }
}
