//! Studio flow — generate candidates, compose, publish.

use std::sync::Arc;

use fashionai_common::{Config, ProductType, Session};
use fashionai_studio::studio::IMAGES_PER_PROMPT;
use fashionai_studio::testing::*;
use fashionai_studio::{
    CancellationToken, PipelineError, PipelineOutput, ProductPipeline, Studio, StudioError,
};
use imagegen_client::ImageGenError;
use storefront_client::StorefrontError;

struct Harness {
    uploader: Arc<MockUploader>,
    compositor: Arc<MockCompositor>,
    generator: Arc<MockGenerator>,
    publisher: Arc<MockPublisher>,
    studio: Studio,
}

fn harness(compositor: MockCompositor, generator: MockGenerator, publisher: MockPublisher) -> Harness {
    let uploader = Arc::new(MockUploader::ok("https://cdn/x.png"));
    let compositor = Arc::new(compositor);
    let generator = Arc::new(generator);
    let publisher = Arc::new(publisher);

    let pipeline = ProductPipeline::new(partial_catalog(), uploader.clone(), compositor.clone());
    let studio = Studio::new(pipeline, Some(generator.clone()), publisher.clone());

    Harness {
        uploader,
        compositor,
        generator,
        publisher,
        studio,
    }
}

fn session() -> Session {
    Session::new("token-123")
}

// ---------------------------------------------------------------------------
// generate_images
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generates_the_requested_number_of_images_in_order() {
    let h = harness(
        MockCompositor::new(),
        MockGenerator::new().then_image(b"first").then_image(b"second"),
        MockPublisher::ok(),
    );

    let images = h
        .studio
        .generate_images("a red fox", "Anime", IMAGES_PER_PROMPT)
        .await
        .unwrap();

    assert_eq!(images.len(), 2);
    assert_eq!(&images[0][..], b"first");
    assert_eq!(&images[1][..], b"second");
    assert_eq!(
        h.generator.calls(),
        vec![
            ("a red fox".to_string(), "Anime".to_string()),
            ("a red fox".to_string(), "Anime".to_string()),
        ]
    );
}

#[tokio::test]
async fn blank_prompt_or_style_never_reaches_the_worker() {
    let h = harness(
        MockCompositor::new(),
        MockGenerator::new().then_image(b"unused"),
        MockPublisher::ok(),
    );

    let err = h.studio.generate_images("  ", "Anime", 2).await.unwrap_err();
    assert!(matches!(err, StudioError::MissingPromptOrStyle));
    let err = h.studio.generate_images("a red fox", "", 2).await.unwrap_err();
    assert!(matches!(err, StudioError::MissingPromptOrStyle));

    assert_eq!(h.generator.call_count(), 0);
}

#[tokio::test]
async fn first_worker_failure_aborts_the_batch() {
    let h = harness(
        MockCompositor::new(),
        MockGenerator::new()
            .then_err(ImageGenError::Api {
                status: 500,
                message: "model overloaded".into(),
            })
            .then_image(b"unused"),
        MockPublisher::ok(),
    );

    let err = h
        .studio
        .generate_images("a red fox", "Anime", 2)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StudioError::ImageGeneration(ImageGenError::Api { status: 500, .. })
    ));
    assert_eq!(h.generator.call_count(), 1, "no retry, no second image");
}

#[tokio::test]
async fn missing_worker_is_a_configuration_error() {
    let uploader = Arc::new(MockUploader::ok("https://cdn/x.png"));
    let pipeline = ProductPipeline::new(partial_catalog(), uploader, Arc::new(MockCompositor::new()));
    let studio = Studio::new(pipeline, None, Arc::new(MockPublisher::ok()));

    let err = studio.generate_images("a red fox", "Anime", 2).await.unwrap_err();
    assert!(matches!(err, StudioError::NotConfigured("IMAGEGEN_WORKER_URL")));
}

// ---------------------------------------------------------------------------
// publish
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_and_publish_reuses_the_pipeline_upload() {
    let h = harness(
        MockCompositor::new().then_ok("https://cdn/out.png"),
        MockGenerator::new(),
        MockPublisher::ok(),
    );
    let request = mug_request();

    let product = h
        .studio
        .create_and_publish(
            &session(),
            ProductType::Mug,
            &request,
            "alice",
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(product.product_type, "Mug");
    assert_eq!(product.product_image_url, "https://cdn/out.png");
    assert_eq!(h.uploader.call_count(), 1);

    let published = h.publisher.published();
    assert_eq!(published.len(), 1);
    let (token, new_product) = &published[0];
    assert_eq!(token, "token-123");
    assert_eq!(new_product.prompt, request.prompt);
    assert_eq!(new_product.generated_image_url, "https://cdn/x.png");
    assert_eq!(new_product.product_image_url, "https://cdn/out.png");
}

#[tokio::test(start_paused = true)]
async fn failed_composition_publishes_nothing() {
    let h = harness(MockCompositor::new(), MockGenerator::new(), MockPublisher::ok());

    let err = h
        .studio
        .create_and_publish(
            &session(),
            ProductType::Mug,
            &mug_request(),
            "alice",
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StudioError::Pipeline(PipelineError::CompositionExhausted { attempts: 3, .. })
    ));
    assert_eq!(h.compositor.call_count(), 3);
    assert!(h.publisher.published().is_empty());
}

#[tokio::test]
async fn unimplemented_product_publishes_nothing() {
    let h = harness(
        MockCompositor::new().then_ok("https://cdn/out.png"),
        MockGenerator::new(),
        MockPublisher::ok(),
    );

    let err = h
        .studio
        .create_and_publish(
            &session(),
            ProductType::ToteBag,
            &mug_request(),
            "alice",
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StudioError::Pipeline(PipelineError::UnimplementedProductType(ProductType::ToteBag))
    ));
    assert_eq!(h.uploader.call_count(), 0);
    assert!(h.publisher.published().is_empty());
}

#[tokio::test]
async fn rejected_token_surfaces_as_session_expired() {
    for status in [401, 403] {
        let h = harness(
            MockCompositor::new(),
            MockGenerator::new(),
            MockPublisher::failing(StorefrontError::SessionExpired { status }),
        );
        let output = PipelineOutput {
            source_image_url: "https://cdn/x.png".into(),
            product_image_urls: vec!["https://cdn/out.png".into()],
        };

        let err = h
            .studio
            .publish(&session(), ProductType::Mug, "a red fox", &output)
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::SessionExpired), "status {status}");
    }
}

#[tokio::test]
async fn other_backend_failures_are_publish_errors() {
    let h = harness(
        MockCompositor::new(),
        MockGenerator::new(),
        MockPublisher::failing(StorefrontError::Api {
            status: 422,
            message: "product_type required".into(),
        }),
    );
    let output = PipelineOutput {
        source_image_url: "https://cdn/x.png".into(),
        product_image_urls: vec!["https://cdn/out.png".into()],
    };

    let err = h
        .studio
        .publish(&session(), ProductType::Mug, "a red fox", &output)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StudioError::Publish(StorefrontError::Api { status: 422, .. })
    ));
}

#[tokio::test]
async fn empty_output_is_not_published() {
    let h = harness(MockCompositor::new(), MockGenerator::new(), MockPublisher::ok());
    let output = PipelineOutput {
        source_image_url: "https://cdn/x.png".into(),
        product_image_urls: vec![],
    };

    let err = h
        .studio
        .publish(&session(), ProductType::Mug, "a red fox", &output)
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::NothingToPublish));
    assert!(h.publisher.published().is_empty());
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

fn storefront_only_config(mockup_api_key: Option<&str>) -> Config {
    Config::from_lookup(|key| match key {
        "STOREFRONT_API_URL" => Some("http://localhost:8000/api".to_string()),
        "MOCKUP_API_KEY" => mockup_api_key.map(String::from),
        _ => None,
    })
    .unwrap()
}

#[test]
fn studio_needs_a_mockup_key() {
    let err = match Studio::from_config(&storefront_only_config(None)) {
        Ok(_) => panic!("studio built without a mockup key"),
        Err(err) => err,
    };
    assert!(matches!(
        err.downcast_ref::<StudioError>(),
        Some(StudioError::NotConfigured("MOCKUP_API_KEY"))
    ));
}

#[test]
fn studio_builds_with_a_mockup_key() {
    assert!(Studio::from_config(&storefront_only_config(Some("key"))).is_ok());
}
