//! The `genai-fit take` command: an interactive, line-based session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use genai_fit_core::guidance::CAREER_PATHS;
use genai_fit_core::model::{AnswerInput, AnswerShape, Question, ResponseValue, Section};
use genai_fit_core::report::AssessmentReport;
use genai_fit_core::scoring::AssessmentResult;
use genai_fit_core::session::{Session, Step};

use super::render::{emit, render_text, OutputFormat};

pub fn execute(
    bank_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let (bank, engine) = super::load_assessment(bank_path, config_path)?;
    let mut session = Session::new(bank, engine);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let Some(result) = run(&mut session, stdin.lock(), &mut stdout)? else {
        eprintln!("Assessment not finished, no report written.");
        return Ok(());
    };

    // the results screen already showed the text rendering
    if format != OutputFormat::Text || output.is_some() {
        let report = AssessmentReport::new(session.bank(), result, session.engine().config());
        emit(&report, format, output.as_deref())?;
    }
    Ok(())
}

/// A parsed input line.
#[derive(Debug, PartialEq)]
enum Input {
    Next,
    Back,
    Goto(Step),
    Restart,
    Quit,
    Answer(String),
    Invalid(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let lower = line.to_lowercase();
        match lower.as_str() {
            "" | "n" | "next" => return Input::Next,
            "b" | "back" => return Input::Back,
            "r" | "restart" => return Input::Restart,
            "q" | "quit" | "exit" => return Input::Quit,
            _ => {}
        }
        if let Some(arg) = lower.strip_prefix("goto") {
            return match arg.trim().parse::<usize>().ok().and_then(Step::from_index) {
                Some(step) => Input::Goto(step),
                None => Input::Invalid("goto expects a step number from 0 to 4".into()),
            };
        }
        Input::Answer(line.to_string())
    }
}

/// Drive `session` from `input` until the respondent quits or input ends.
///
/// Returns the result if the session ended on the results step.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    out: &mut W,
) -> Result<Option<AssessmentResult>> {
    loop {
        show(session, out)?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        match Input::parse(&line) {
            Input::Quit => break,
            Input::Next if session.step() == Step::Results => break,
            Input::Next => next(session, out)?,
            Input::Back => back(session),
            Input::Goto(step) => session.jump(step),
            Input::Restart if session.step() == Step::Results => session.restart(),
            Input::Restart => writeln!(out, "Restart is available on the results screen.")?,
            Input::Answer(text) => answer(session, &text, out)?,
            Input::Invalid(message) => writeln!(out, "{message}")?,
        }
    }

    if session.step() == Step::Results {
        Ok(session.result().cloned())
    } else {
        Ok(None)
    }
}

fn next<W: Write>(session: &mut Session, out: &mut W) -> Result<()> {
    let moved = if session.step().section().is_some() {
        session.next_question().map(|_| ())
    } else {
        session.advance().map(|_| ())
    };
    if let Err(e) = moved {
        writeln!(out, "Cannot continue: {e}")?;
    }
    Ok(())
}

fn back(session: &mut Session) {
    if session.previous_question().is_none() {
        session.retreat();
    }
}

fn answer<W: Write>(session: &mut Session, text: &str, out: &mut W) -> Result<()> {
    let Some(question) = session.current_question() else {
        writeln!(out, "Nothing to answer here. Press Enter to continue.")?;
        return Ok(());
    };

    let value = match parse_answer(question, text) {
        Ok(value) => value,
        Err(message) => {
            writeln!(out, "{message}")?;
            return Ok(());
        }
    };

    if let Err(e) = session.answer_current(value) {
        writeln!(out, "{e}")?;
        return Ok(());
    }
    next(session, out)
}

/// Option numbers or labels for choices, the raw value for scales.
fn parse_answer(question: &Question, text: &str) -> Result<ResponseValue, String> {
    match &question.shape {
        AnswerShape::Choice { options } => match text.parse::<usize>() {
            Ok(number) => question.option_by_number(number).map_err(|_| {
                format!("Enter an option number from 1 to {}.", options.len())
            }),
            Err(_) => question
                .interpret(&AnswerInput::Label(text.to_string()))
                .map_err(|e| e.to_string()),
        },
        AnswerShape::Scale { min, max, .. } => {
            let value = text
                .parse::<i64>()
                .map_err(|_| format!("Enter a number from {min} to {max}."))?;
            let value = ResponseValue::Scale { value };
            question.check(&value).map_err(|e| e.to_string())?;
            Ok(value)
        }
    }
}

fn show<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let step = session.step();
    writeln!(
        out,
        "\n== {} (step {} of {}, {}%) ==",
        step,
        step.index() + 1,
        Step::ALL.len(),
        session.progress_percent()
    )?;

    match step {
        Step::Introduction => show_introduction(session, out),
        Step::Results => show_results(session, out),
        Step::Psychological | Step::Technical | Step::Wiscar => show_question(session, out),
    }
}

fn show_introduction<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let bank = session.bank();
    writeln!(out, "{}", bank.name())?;
    if !bank.description().is_empty() {
        writeln!(out, "{}", bank.description())?;
    }
    writeln!(out)?;
    for section in Section::ALL {
        writeln!(
            out,
            "  {} ({} questions)",
            section.title(),
            bank.section(section).len()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Career paths you could pursue:")?;
    for path in CAREER_PATHS {
        writeln!(out, "  {}: {}", path.title, path.summary)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Answer with an option number or scale value. Commands: n next, b back, goto <0-4>, q quit."
    )?;
    writeln!(out, "Press Enter to begin.")?;
    Ok(())
}

fn show_question<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let (Some(section), Some(question)) = (session.step().section(), session.current_question())
    else {
        return Ok(());
    };
    let cursor = session.cursor(section);

    writeln!(
        out,
        "Question {} of {} ({}%)",
        cursor.position() + 1,
        cursor.len(),
        cursor.progress_percent()
    )?;
    writeln!(out, "{}", question.prompt)?;

    match &question.shape {
        AnswerShape::Choice { options } => {
            for (i, option) in options.iter().enumerate() {
                writeln!(out, "  {}) {}", i + 1, option.label)?;
            }
        }
        AnswerShape::Scale {
            min,
            max,
            min_label,
            max_label,
        } => {
            let low = min_label.as_deref().unwrap_or("low");
            let high = max_label.as_deref().unwrap_or("high");
            writeln!(out, "  {min} = {low} ... {max} = {high}")?;
        }
    }

    match session.responses().get(&question.id) {
        Some(ResponseValue::Scale { value }) => writeln!(out, "Current answer: {value}")?,
        Some(ResponseValue::Choice { .. }) => writeln!(out, "Current answer: recorded")?,
        None => {}
    }
    Ok(())
}

fn show_results<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    match session.result() {
        Some(result) => {
            write!(out, "{}", render_text(result))?;
            writeln!(out, "\nr restart, b back, q or Enter to finish.")?;
        }
        None => {
            writeln!(out, "No results yet. Answer every section first.")?;
            writeln!(out, "b back, goto <0-4> to jump, q to quit.")?;
        }
    }
    Ok(())
}
