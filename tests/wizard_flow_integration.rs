//! Integration tests for the wizard flow.
//!
//! These tests drive whole sessions against a recording mock of the
//! marketplace API:
//! 1. Step lists follow the material type
//! 2. Submissions go to the right backend step with the right payload
//! 3. Edit mode opens on the first incomplete step
//! 4. Autosave is debounced and silent

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use auction_wizard::adapters::InMemoryNotifier;
use auction_wizard::application::{
    AutosaveScheduler, HydrateDraftError, HydrateDraftHandler, StartCreationHandler, SubmitError,
    SubmitOutcome, WizardSession,
};
use auction_wizard::config::AutosaveConfig;
use auction_wizard::domain::foundation::AdId;
use auction_wizard::domain::listing::{
    AuctionDuration, Category, FinalStepForm, FullAdRecord, ImageFile, KeywordError, Keywords,
    Location, MaterialTypePayload, Price, Quantity,
};
use auction_wizard::domain::wizard::{
    BackendStep, DraftUpdate, StepCompletionStatus, StepKind, SubmissionStatus,
};
use auction_wizard::ports::{ApiError, AuctionApi, CreatedDraft, StepUpdate, ToastLevel};

// =============================================================================
// Test Infrastructure
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(MaterialTypePayload),
    Update(AdId, BackendStep, serde_json::Value),
    Final(AdId, FinalStepForm),
    Detail(AdId),
    Categories,
}

/// Records every call and answers from canned data.
struct MockAuctionApi {
    calls: Mutex<Vec<Call>>,
    record: Mutex<Option<FullAdRecord>>,
    failure: Mutex<Option<ApiError>>,
}

impl MockAuctionApi {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            record: Mutex::new(None),
            failure: Mutex::new(None),
        }
    }

    fn with_record(record: FullAdRecord) -> Self {
        let api = Self::new();
        *api.record.lock().unwrap() = Some(record);
        api
    }

    fn fail_with(&self, err: ApiError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(..) | Call::Final(..)))
            .collect()
    }

    fn record_call(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuctionApi for MockAuctionApi {
    async fn create_draft_step1(&self, payload: &MaterialTypePayload) -> Result<CreatedDraft, ApiError> {
        self.record_call(Call::Create(payload.clone()))?;
        Ok(CreatedDraft {
            ad_id: AdId::new(101),
            step_completion_status: StepCompletionStatus::new().with(BackendStep::new(1), true),
        })
    }

    async fn update_draft_step(
        &self,
        ad_id: AdId,
        step: BackendStep,
        payload: &serde_json::Value,
    ) -> Result<StepUpdate, ApiError> {
        self.record_call(Call::Update(ad_id, step, payload.clone()))?;
        Ok(StepUpdate {
            step_completion_status: StepCompletionStatus::new().with(step, true),
            is_complete: false,
        })
    }

    async fn update_final_step(&self, ad_id: AdId, form: &FinalStepForm) -> Result<StepUpdate, ApiError> {
        self.record_call(Call::Final(ad_id, form.clone()))?;
        Ok(StepUpdate {
            step_completion_status: StepCompletionStatus::new().with(BackendStep::FINAL, true),
            is_complete: true,
        })
    }

    async fn get_full_ad_detail(&self, ad_id: AdId) -> Result<FullAdRecord, ApiError> {
        self.record_call(Call::Detail(ad_id))?;
        Ok(self
            .record
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| FullAdRecord::empty(ad_id)))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.record_call(Call::Categories)?;
        Ok(serde_json::from_value(json!([
            {"id": 1, "name": "Plastics", "subcategories": [
                {"id": 10, "name": "HDPE"}, {"id": 11, "name": "PET"}
            ]},
            {"id": 2, "name": "Metals", "subcategories": [
                {"id": 20, "name": "Aluminium"}, {"id": 21, "name": "Copper"}
            ]}
        ]))
        .unwrap())
    }
}

struct Harness {
    api: Arc<MockAuctionApi>,
    notifier: Arc<InMemoryNotifier>,
}

impl Harness {
    fn new() -> Self {
        Self::with_api(MockAuctionApi::new())
    }

    fn with_api(api: MockAuctionApi) -> Self {
        Self {
            api: Arc::new(api),
            notifier: Arc::new(InMemoryNotifier::new()),
        }
    }

    async fn start(&self) -> WizardSession {
        StartCreationHandler::new(self.api.clone(), self.notifier.clone())
            .handle()
            .await
            .unwrap()
    }
}

fn step_one(material: &str, subcategory: &str) -> DraftUpdate {
    DraftUpdate::new()
        .material_type(material)
        .category(material)
        .subcategory(subcategory)
        .specific_material("Regrind")
        .packaging("Big-bag")
        .sell_frequency("Monthly")
}

fn location() -> Location {
    Location {
        country: "Germany".to_string(),
        region: "Bavaria".to_string(),
        city: "Munich".to_string(),
        delivery_options: vec!["Pick-up only".to_string()],
        full_address: "Industriestr. 4".to_string(),
        postal_code: "80331".to_string(),
    }
}

fn quantity() -> Quantity {
    Quantity {
        available: 1000.0,
        unit: "kg".to_string(),
        minimum_order: 100.0,
        packaging: String::new(),
    }
}

fn price(duration: AuctionDuration, custom_days: u32) -> Price {
    Price {
        base_price: 50.0,
        auction_duration: Some(duration),
        custom_auction_duration: custom_days,
        ..Default::default()
    }
}

fn final_step() -> DraftUpdate {
    DraftUpdate::new()
        .title("Copper wire scrap")
        .description("Stripped, bright")
        .keywords(Keywords::from_vec(vec!["copper".to_string(), "wire".to_string()]))
        .images(vec![ImageFile::new("wire.jpg", "image/jpeg", vec![1, 2, 3])])
}

// =============================================================================
// Step lists
// =============================================================================

#[tokio::test]
async fn material_type_decides_the_step_list() {
    let harness = Harness::new();
    let mut session = harness.start().await;

    session.update(step_one("Metals", "Copper"));
    assert_eq!(session.state().steps().len(), 4);

    session.update(DraftUpdate::new().material_type("Plastics").category("Plastics"));
    assert_eq!(session.state().steps().len(), 8);

    session.go_to_step(6).unwrap();
    session.update(DraftUpdate::new().material_type("Metals").category("Metals"));
    assert_eq!(session.state().steps().len(), 4);
    assert_eq!(session.state().active_step_id(), 1);
}

#[tokio::test]
async fn going_to_a_missing_step_is_rejected() {
    let harness = Harness::new();
    let mut session = harness.start().await;
    session.update(step_one("Metals", "Copper"));

    assert!(session.go_to_step(6).is_err());
    assert_eq!(session.state().active_step_id(), 1);
    assert!(session.go_back().is_none());
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn metals_flow_maps_steps_and_completes() {
    let harness = Harness::new();
    let mut session = harness.start().await;

    session.update(step_one("Metals", "Copper"));
    session.submit_current_step().await.unwrap();
    session.update(DraftUpdate::new().location(location()));
    session.submit_current_step().await.unwrap();
    session.update(
        DraftUpdate::new()
            .quantity(quantity())
            .price(price(AuctionDuration::SevenDays, 0)),
    );
    session.submit_current_step().await.unwrap();
    assert_eq!(session.progress().completed, 3);

    session.update(final_step());
    let outcome = session.submit_current_step().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Completed { ad_id: AdId::new(101) });
    assert!(session.is_complete());
    assert_eq!(session.progress().percent(), 100);

    let calls = harness.api.write_calls();
    assert_eq!(calls.len(), 4);
    assert!(matches!(&calls[0], Call::Create(p) if p.category == 2 && p.subcategory == 21));
    assert!(matches!(&calls[1], Call::Update(id, step, body)
        if *id == AdId::new(101) && *step == BackendStep::new(6) && body["delivery_options"] == json!(["pickup_only"])));
    assert!(matches!(&calls[2], Call::Update(_, step, body)
        if *step == BackendStep::new(7) && body["auction_duration"] == json!(7)));
    match &calls[3] {
        Call::Final(id, form) => {
            assert_eq!(*id, AdId::new(101));
            assert_eq!(form.keywords, "copper, wire");
            assert_eq!(form.image.as_ref().map(|i| i.file_name.as_str()), Some("wire.jpg"));
        }
        other => panic!("expected final step upload, got {:?}", other),
    }

    assert_eq!(harness.notifier.toasts_of(ToastLevel::Success).len(), 1);
    assert!(harness.notifier.toasts_of(ToastLevel::Error).is_empty());
}

#[tokio::test]
async fn plastics_steps_keep_their_numbers() {
    let harness = Harness::new();
    let mut session = harness.start().await;

    session.update(step_one("Plastics", "HDPE"));
    session.submit_current_step().await.unwrap();
    session.submit_current_step().await.unwrap();

    let calls = harness.api.write_calls();
    assert!(matches!(&calls[1], Call::Update(_, step, _) if *step == BackendStep::new(2)));
    assert_eq!(session.state().active_step().kind, StepKind::MaterialOrigin);
}

#[tokio::test]
async fn custom_duration_without_days_is_blocked() {
    let harness = Harness::new();
    let mut session = harness.start().await;
    session.update(step_one("Metals", "Copper"));
    session.submit_current_step().await.unwrap();
    session.update(DraftUpdate::new().location(location()));
    session.submit_current_step().await.unwrap();

    session.update(
        DraftUpdate::new()
            .quantity(quantity())
            .price(price(AuctionDuration::Custom, 0)),
    );
    let result = session.submit_current_step().await;

    match result {
        Err(SubmitError::Validation(validation)) => {
            assert!(validation.error("price.auction_duration").is_some());
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(harness.api.write_calls().len(), 2);

    session.update(DraftUpdate::new().price(price(AuctionDuration::Custom, 10)));
    session.submit_current_step().await.unwrap();
    let calls = harness.api.write_calls();
    assert!(matches!(&calls[2], Call::Update(_, _, body)
        if body["auction_duration"] == json!(10) && body["custom_auction_duration"] == json!(10)));
}

#[tokio::test]
async fn unknown_subcategory_never_reaches_the_network() {
    let harness = Harness::new();
    let mut session = harness.start().await;
    session.update(step_one("Metals", "Brass"));

    let result = session.submit_current_step().await;

    assert!(matches!(result, Err(SubmitError::MissingPayload { .. })));
    assert!(harness.api.write_calls().is_empty());
    assert_eq!(session.status(), SubmissionStatus::Idle);
    assert_eq!(harness.notifier.toasts_of(ToastLevel::Error).len(), 1);
}

#[tokio::test]
async fn backend_field_errors_are_shown_inline() {
    let harness = Harness::new();
    let mut session = harness.start().await;
    session.update(step_one("Metals", "Copper"));
    session.submit_current_step().await.unwrap();

    harness.api.fail_with(
        ApiError::rejected(400, "Invalid data")
            .with_field_error("city", "Unknown city")
            .with_field_error("city", "Check spelling"),
    );
    session.update(DraftUpdate::new().location(location()));
    let result = session.submit_current_step().await;

    assert!(matches!(result, Err(SubmitError::Api(ApiError::Rejected { status: 400, .. }))));
    let state = session.state();
    assert_eq!(
        state.validation_errors().get("location.city").map(String::as_str),
        Some("Unknown city Check spelling")
    );
    assert!(state.show_errors());
    assert!(state.has_unsaved_changes());
    assert_eq!(harness.notifier.last().map(|t| t.message), Some("Invalid data".to_string()));

    session.update(DraftUpdate::new().location(location()));
    assert!(session.state().validation_errors().is_empty());
    assert!(!session.state().show_errors());
}

#[test]
fn keywords_limit_blocks_additions() {
    let mut keywords = Keywords::from_vec(vec![
        "HDPE".to_string(),
        "recycling".to_string(),
        "food grade".to_string(),
    ]);
    assert_eq!(keywords.joined().len(), 27);
    assert!(keywords.are_valid());

    let long = "x".repeat(400);
    keywords.try_add(&long).unwrap();
    assert!(matches!(keywords.try_add(&"y".repeat(80)), Err(KeywordError::TooLong { .. })));
    assert!(keywords.are_valid());

    let over = Keywords::from_vec(vec!["z".repeat(501)]);
    assert!(!over.are_valid());
}

// =============================================================================
// Edit mode
// =============================================================================

fn saved_metals_ad() -> FullAdRecord {
    serde_json::from_value(json!({
        "id": 55,
        "title": "Aluminium profiles",
        "description": "Mixed alloys",
        "keywords": "aluminium, profiles",
        "image": "https://cdn.example.com/ads/55.jpg",
        "category": 2,
        "subcategory": 20,
        "specific_material": "6063 profiles",
        "packaging": "big_bag",
        "material_frequency": "monthly",
        "location_data": {"country": "Poland", "state_province": "Silesia", "city": "Katowice"},
        "delivery_options": ["pickup_only", "drone_drop"],
        "step_completion_status": {"step_1": true, "step_6": true, "step_7": false}
    }))
    .unwrap()
}

#[tokio::test]
async fn edit_opens_on_first_incomplete_step() {
    let harness = Harness::with_api(MockAuctionApi::with_record(saved_metals_ad()));

    let result = HydrateDraftHandler::new(harness.api.clone(), harness.notifier.clone())
        .handle(AdId::new(55))
        .await
        .unwrap();

    let session = result.session;
    assert_eq!(session.ad_id(), Some(AdId::new(55)));
    assert_eq!(session.state().active_step().kind, StepKind::QuantityPrice);
    assert_eq!(session.draft().subcategory, "Aluminium");
    assert_eq!(session.draft().packaging, "Big-bag");
    assert_eq!(
        session.draft().existing_image_url.as_deref(),
        Some("https://cdn.example.com/ads/55.jpg")
    );
    assert!(!session.state().has_unsaved_changes());

    assert_eq!(result.report.unmapped_codes.len(), 1);
    assert_eq!(result.report.unmapped_codes[0].code, "drone_drop");
    assert!(!result.report.used_fallback());
    assert!(harness.notifier.is_empty());

    let calls = harness.api.calls();
    assert!(calls.contains(&Call::Categories));
    assert!(calls.contains(&Call::Detail(AdId::new(55))));
}

#[tokio::test]
async fn edit_falls_back_when_category_is_unknown() {
    let mut record = saved_metals_ad();
    record.category = Some(99);
    let harness = Harness::with_api(MockAuctionApi::with_record(record));

    let result = HydrateDraftHandler::new(harness.api.clone(), harness.notifier.clone())
        .handle(AdId::new(55))
        .await
        .unwrap();

    assert!(result.report.used_fallback());
    assert_eq!(result.session.draft().title, "Aluminium profiles");
    assert_eq!(result.session.draft().keywords.len(), 2);
    assert_eq!(harness.notifier.toasts_of(ToastLevel::Info).len(), 1);
}

#[tokio::test]
async fn edit_reports_fetch_failures() {
    let harness = Harness::new();
    harness.api.fail_with(ApiError::Timeout { timeout_secs: 30 });

    let result = HydrateDraftHandler::new(harness.api.clone(), harness.notifier.clone())
        .handle(AdId::new(55))
        .await;

    assert!(matches!(
        result,
        Err(HydrateDraftError::Api(ApiError::Timeout { timeout_secs: 30 }))
    ));
    assert_eq!(harness.notifier.toasts_of(ToastLevel::Error).len(), 1);
}

// =============================================================================
// Autosave
// =============================================================================

async fn scheduler_on_location_step(harness: &Harness) -> AutosaveScheduler {
    let mut session = harness.start().await;
    session.update(step_one("Metals", "Copper"));
    session.submit_current_step().await.unwrap();
    let config = AutosaveConfig {
        enabled: true,
        debounce_ms: 2000,
    };
    AutosaveScheduler::new(Arc::new(tokio::sync::Mutex::new(session)), &config)
}

fn location_edit(city: &str) -> DraftUpdate {
    DraftUpdate::new().location(Location {
        city: city.to_string(),
        ..location()
    })
}

#[tokio::test(start_paused = true)]
async fn autosave_coalesces_rapid_edits() {
    let harness = Harness::new();
    let mut scheduler = scheduler_on_location_step(&harness).await;

    scheduler.update(location_edit("Munich")).await;
    tokio::time::sleep(Duration::from_millis(500)).await;
    scheduler.update(location_edit("Augsburg")).await;
    tokio::time::sleep(Duration::from_millis(500)).await;
    scheduler.update(location_edit("Nuremberg")).await;
    assert!(scheduler.is_pending());

    tokio::time::sleep(Duration::from_millis(2500)).await;

    let calls = harness.api.write_calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(&calls[1], Call::Update(_, step, body)
        if *step == BackendStep::new(6) && body["location_data"]["city"] == json!("Nuremberg")));
    assert!(!scheduler.session().lock().await.state().has_unsaved_changes());
}

#[tokio::test(start_paused = true)]
async fn autosave_failure_stays_silent() {
    let harness = Harness::new();
    let mut scheduler = scheduler_on_location_step(&harness).await;
    harness.api.fail_with(ApiError::network("connection reset"));

    scheduler.update(location_edit("Munich")).await;
    tokio::time::sleep(Duration::from_millis(2500)).await;

    assert_eq!(harness.api.write_calls().len(), 2);
    assert!(harness.notifier.is_empty());
    assert!(scheduler.session().lock().await.state().has_unsaved_changes());
}

#[tokio::test(start_paused = true)]
async fn closing_cancels_pending_autosave() {
    let harness = Harness::new();
    let mut scheduler = scheduler_on_location_step(&harness).await;

    scheduler.update(location_edit("Munich")).await;
    scheduler.close().await;
    tokio::time::sleep(Duration::from_millis(5000)).await;

    assert_eq!(harness.api.write_calls().len(), 1);
    assert!(scheduler.session().lock().await.is_closed());
}
