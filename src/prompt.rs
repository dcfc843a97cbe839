//! Line-oriented prompt mode
//!
//! Asks for each movie field on stdin, runs the same delayed estimate as the
//! TUI behind an indicatif spinner and prints a plain text report. Used with
//! `--prompt` or when stdout is not a terminal.

use std::io::{self, BufRead, BufReader, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tokio::sync::mpsc;
use tracing::info;

use crate::app::job::EstimateJob;
use crate::app::state::{ControllerAction, Effect, StateManager};
use crate::config::AppConfig;
use crate::models::{Estimate, MovieRecord, RecordField, RATING_OPTIONS};
use crate::util::{format_compact_currency, format_currency};
use crate::{CinemaError, Result};

/// Read one line, failing on end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CinemaError::IoError(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended before the form was complete",
        )));
    }
    Ok(line.trim().to_string())
}

/// Canonical rating for user text, matching case-insensitively
fn normalize_rating(raw: &str) -> Option<&'static str> {
    RATING_OPTIONS
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(raw))
}

/// Ask for a single field until the answer is acceptable
pub fn ask_field<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    field: RecordField,
) -> Result<String> {
    loop {
        let marker = if field.is_required() { "*" } else { "" };
        if field == RecordField::Rating {
            write!(output, "{}{} [{}]: ", field.label(), marker, RATING_OPTIONS.join("/"))?;
        } else {
            write!(output, "{}{} ({}): ", field.label(), marker, field.placeholder())?;
        }
        output.flush()?;

        let answer = read_line(input)?;
        if answer.is_empty() {
            if field.is_required() {
                writeln!(output, "  {} is required.", field.label())?;
                continue;
            }
            return Ok(answer);
        }

        if field == RecordField::Rating {
            match normalize_rating(&answer) {
                Some(rating) => return Ok(rating.to_string()),
                None => {
                    writeln!(output, "  Choose one of {}.", RATING_OPTIONS.join(", "))?;
                    continue;
                }
            }
        }
        return Ok(answer);
    }
}

/// Ask for every field in form order
pub fn read_record<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<MovieRecord> {
    writeln!(output, "Enter movie details (* = required)")?;
    let mut record = MovieRecord::new();
    for field in RecordField::ALL {
        let value = ask_field(input, output, field)?;
        record.set(field, value);
    }
    Ok(record)
}

fn spinner(show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message("Analyzing box office potential...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run the delayed estimate for `record` through the state manager
///
/// Fails when a required field is empty, since the submit is then refused.
pub async fn predict(
    record: &MovieRecord,
    delay: Duration,
    seed: u64,
    show_spinner: bool,
) -> Result<Estimate> {
    let mut state = StateManager::new();
    state.handle(ControllerAction::Start);
    for field in RecordField::ALL {
        state.handle(ControllerAction::Edit(field, record.get(field).to_string()));
    }

    let (job_id, record) = match state.handle(ControllerAction::Submit) {
        Effect::ScheduleEstimate { job_id, record } => (job_id, record),
        _ => {
            let missing: Vec<&str> = state.missing_required().iter().map(|f| f.label()).collect();
            return Err(CinemaError::TaskError(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
    };

    let (tx, mut rx) = mpsc::channel(1);
    let job = EstimateJob::spawn(job_id, record, delay, seed, tx);
    let pb = spinner(show_spinner);

    let ready = rx.recv().await;
    pb.finish_and_clear();
    job.join().await?;

    let ready = ready.ok_or_else(|| {
        CinemaError::TaskError(format!("Estimate job {} ended without a result", job_id))
    })?;
    state.handle(ControllerAction::EstimateReady {
        job_id: ready.job_id,
        estimate: ready.estimate,
    });

    state
        .estimate()
        .cloned()
        .ok_or_else(|| CinemaError::TaskError(format!("Estimate job {} was not accepted", job_id)))
}

/// Plain text report for a finished prediction
pub fn render_report(record: &MovieRecord, estimate: &Estimate) -> String {
    let mut report = String::new();
    report.push_str(&format!("\nPrediction for \"{}\"\n", record.name));
    report.push_str(&format!(
        "  Predicted gross: {} ({})\n",
        format_currency(estimate.gross),
        format_compact_currency(estimate.gross)
    ));
    report.push_str(&format!("  Revenue bucket:  {}\n", estimate.label()));
    for field in RecordField::ALL {
        let value = record.get(field);
        if !value.is_empty() && field != RecordField::Name {
            report.push_str(&format!("  {:<20} {}\n", format!("{}:", field.label()), value));
        }
    }
    report
}

/// Ask yes/no, defaulting to no
fn ask_again<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "\nRun another prediction? [y/N]: ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes"))
}

/// Drive the prompt flow over arbitrary input and output
pub async fn run_with<R: BufRead, W: Write>(
    config: &AppConfig,
    input: &mut R,
    output: &mut W,
    show_spinner: bool,
) -> Result<()> {
    let mut rng = match config.rng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    writeln!(output, "NeuroCinema - box office revenue prediction")?;
    loop {
        let record = read_record(input, output)?;
        let estimate = predict(&record, config.estimate_delay, rng.gen(), show_spinner).await?;
        info!(title = %record.name, gross = estimate.gross, "prompt prediction");
        write!(output, "{}", render_report(&record, &estimate))?;

        if !ask_again(input, output)? {
            break;
        }
    }
    Ok(())
}

/// Prompt mode on stdin and stdout
pub async fn run(config: &AppConfig) -> Result<()> {
    let mut input = BufReader::new(io::stdin());
    let mut output = io::stdout();
    run_with(config, &mut input, &mut output, true).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator;
    use std::io::Cursor;

    /// Answers for every field in form order
    const DRAMA_ANSWERS: &str = "Quiet Rooms\nDrama\nA. Director\n\n\npg-13\n\n100\n9\n10000000\n2020\n1000\n\n\n";

    #[test]
    fn test_read_record_in_form_order() {
        let mut input = Cursor::new(DRAMA_ANSWERS);
        let mut output = Vec::new();
        let record = read_record(&mut input, &mut output).unwrap();

        assert_eq!(record.name, "Quiet Rooms");
        assert_eq!(record.genre, "Drama");
        assert_eq!(record.rating, "PG-13");
        assert_eq!(record.budget, "10000000");
        assert!(record.star.is_empty());
        assert!(record.is_complete());
    }

    #[test]
    fn test_required_field_is_asked_again() {
        let mut input = Cursor::new("\n\nHeat\n");
        let mut output = Vec::new();
        let value = ask_field(&mut input, &mut output, RecordField::Name).unwrap();

        assert_eq!(value, "Heat");
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Movie Title is required.").count(), 2);
    }

    #[test]
    fn test_unknown_rating_is_rejected() {
        let mut input = Cursor::new("X\nnc-17\n");
        let mut output = Vec::new();
        let value = ask_field(&mut input, &mut output, RecordField::Rating).unwrap();

        assert_eq!(value, "NC-17");
        assert!(String::from_utf8(output).unwrap().contains("Choose one of"));
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut input = Cursor::new("Heat\n");
        let mut output = Vec::new();
        let err = read_record(&mut input, &mut output).unwrap_err();
        assert!(matches!(err, CinemaError::IoError(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[tokio::test]
    async fn test_predict_drama_scenario() {
        let record = read_record(&mut Cursor::new(DRAMA_ANSWERS), &mut Vec::new()).unwrap();
        let estimate = predict(&record, Duration::ZERO, 5, false).await.unwrap();

        let base = estimator::base_gross(&record);
        assert!(estimate.gross >= base * 0.8 && estimate.gross < base * 1.2);
    }

    #[tokio::test]
    async fn test_predict_refuses_incomplete_record() {
        let record = MovieRecord::new().with(RecordField::Name, "Heat");
        let err = predict(&record, Duration::ZERO, 1, false).await.unwrap_err();
        assert!(err.to_string().contains("Missing required fields"));
    }

    #[tokio::test]
    async fn test_run_with_prints_report() {
        let config = AppConfig::default()
            .with_estimate_delay(Duration::ZERO)
            .with_rng_seed(11);
        let script = format!("{}n\n", DRAMA_ANSWERS);
        let mut input = Cursor::new(script);
        let mut output = Vec::new();

        run_with(&config, &mut input, &mut output, false).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Prediction for \"Quiet Rooms\""));
        assert!(text.contains("Predicted gross: $"));
        assert!(text.contains("Revenue bucket:"));
    }

    #[test]
    fn test_render_report_lists_filled_fields() {
        let record = MovieRecord::new()
            .with(RecordField::Name, "Heat")
            .with(RecordField::Genre, "Crime");
        let report = render_report(&record, &Estimate::new(150_000_000.0));

        assert!(report.contains("$150,000,000"));
        assert!(report.contains("High Revenue"));
        assert!(report.contains("Genre:"));
        assert!(!report.contains("Director:"));
    }
}
