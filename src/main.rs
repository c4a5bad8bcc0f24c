use anyhow::{bail, Context, Result};
use identity_verify::capture::{Camera, CaptureController, NoCamera, StillCamera};
use identity_verify::config::Config;
use identity_verify::detector::{FaceDetector, StaticFaceDetector};
use identity_verify::form::{SubmitOutcome, VerificationForm};
use identity_verify::i18n::{Language, TableValidator, ALL_TABLES, ENGLISH_MESSAGES};
use identity_verify::quality::QualityGate;
use identity_verify::submission::VerificationClient;
use identity_verify::upload::DocumentFile;
use tracing::{info, warn};

const USAGE: &str = "Usage: identity-verify --name <NAME> --age <AGE> --dob <DOB> \
--photo <IMAGE> --document <FILE> [--lang <eng|hin|tam>] [--skip-face-check]";

/// Command-line form input.
#[derive(Debug, Default)]
struct CliArgs {
    name: String,
    age: String,
    dob: String,
    photo: Option<String>,
    document: Option<String>,
    language: Option<String>,
    skip_face_check: bool,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = CliArgs::default();
        let mut iter = args.iter().skip(1);

        while let Some(arg) = iter.next() {
            let mut value = || {
                iter.next()
                    .cloned()
                    .with_context(|| format!("Missing value for {}\n{}", arg, USAGE))
            };
            match arg.as_str() {
                "--name" => parsed.name = value()?,
                "--age" => parsed.age = value()?,
                "--dob" => parsed.dob = value()?,
                "--photo" => parsed.photo = Some(value()?),
                "--document" => parsed.document = Some(value()?),
                "--lang" => parsed.language = Some(value()?),
                "--skip-face-check" => parsed.skip_face_check = true,
                "--help" | "-h" => {
                    println!("{}", USAGE);
                    std::process::exit(0);
                }
                other => bail!("Unknown argument: {}\n{}", other, USAGE),
            }
        }

        Ok(parsed)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("identity_verify=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli = CliArgs::parse(&args)?;

    let config = Config::from_env()?;
    let language = match &cli.language {
        Some(code) => Language::from_code(code)?,
        None => config.default_language,
    };

    check_translations();

    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let detector = load_detector(&config, &client, cli.skip_face_check).await?;
    let gate = QualityGate::new(detector).with_blur_threshold(config.blur_threshold);

    let camera: Box<dyn Camera> = match &cli.photo {
        Some(path) => Box::new(StillCamera::from_path(path)?),
        None => Box::new(NoCamera),
    };
    let capture = CaptureController::new(camera)
        .with_frame_size(config.capture_width, config.capture_height);

    let verifier = VerificationClient::new(client, &config.verify_base_url)
        .context("Failed to build verification endpoint")?;

    let mut form = VerificationForm::new(capture, gate, verifier, language)
        .with_toast_duration(config.toast_duration);

    form.set_name(cli.name.as_str());
    form.set_age(cli.age.as_str());
    form.set_dob(cli.dob.as_str());

    if form.open_camera().await {
        form.capture().await;
    }

    if let Some(path) = &cli.document {
        let document = DocumentFile::from_path(path)
            .await
            .with_context(|| format!("Failed to load document {}", path))?;
        form.choose_file(document).await;
    }

    let outcome = form.submit().await;

    println!("\n========== TOASTS ==========");
    for toast in form.toasts().history() {
        println!("[{}] {}", toast.kind.as_str(), toast.message);
    }
    if let Some(result) = &form.state().result {
        println!("\n========== RESULT ({}) ==========", result.style.class_name());
        println!("{}", result.text);
    }
    println!("=============================\n");

    match outcome {
        SubmitOutcome::Verified(_) => {
            info!("Verification complete");
            Ok(())
        }
        SubmitOutcome::Blocked(reason) => bail!("Form not submitted: {}", reason),
        SubmitOutcome::Failed(e) => bail!("Verification failed: {}", e),
    }
}

/// Log any gaps in the bundled message tables.
fn check_translations() {
    let report = TableValidator::validate(&ENGLISH_MESSAGES, &ALL_TABLES);
    for error in &report.errors {
        warn!("Message table error: {}", error);
    }
    for warning in &report.warnings {
        warn!("Message table warning: {}", warning);
    }
}

async fn load_detector(
    config: &Config,
    client: &reqwest::Client,
    skip_face_check: bool,
) -> Result<Box<dyn FaceDetector>> {
    if skip_face_check {
        warn!("Face check skipped, every sharp frame counts as one face");
        return Ok(Box::new(StaticFaceDetector::new(1)));
    }

    #[cfg(feature = "rustface")]
    {
        use identity_verify::detector::RustfaceDetector;

        if let Some(path) = &config.face_model_path {
            return Ok(Box::new(RustfaceDetector::from_file(path)?));
        }
        if let Some(uri) = &config.face_model_url {
            return Ok(Box::new(RustfaceDetector::load_from_uri(client, uri).await?));
        }
    }

    #[cfg(not(feature = "rustface"))]
    let _ = (config, client);

    bail!("No face detection model configured: set FACE_MODEL_PATH or FACE_MODEL_URL, or pass --skip-face-check")
}
