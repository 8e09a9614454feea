use colored::Colorize;
use std::io::{self, BufRead, Write};

use portfolio_selector_core::selection::SelectionPolicy;

use super::{summary, Session};
use crate::output::{self, display};
use crate::OutputFormat;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Interactive loop over stdin/stdout.
pub fn run_menu(session: &mut Session, format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    if session.reads_stdin() {
        return Err("menu needs an interactive stdin; pass --data <file.csv>".into());
    }
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_menu_with(session, format, &mut stdin.lock(), &mut stdout.lock())
}

/// Menu loop over any line source. Returns on option 0 or end of input.
pub fn run_menu_with<R: BufRead, W: Write>(
    session: &mut Session,
    format: &OutputFormat,
    input: &mut R,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        print_menu(out)?;
        let Some(line) = read_line(input)? else {
            return Ok(());
        };

        let policy = match line.trim() {
            "1" => {
                let value = summary::run_summary(session)?;
                output::write_output(out, format, &value)?;
                continue;
            }
            "2" => SelectionPolicy::Random,
            "3" => SelectionPolicy::BruteForce,
            "4" => SelectionPolicy::Greedy,
            "9" => {
                write!(out, "{CLEAR_SCREEN}")?;
                continue;
            }
            "0" => return Ok(()),
            _ => {
                writeln!(out, "{}", "Invalid option".red())?;
                continue;
            }
        };

        let Some(size) = ask_portfolio_size(session.selector.len(), input, out)? else {
            return Ok(());
        };

        match session.select(policy, size) {
            Ok(selection) => display::write_selection(out, &selection)?,
            Err(e) => writeln!(out, "{}: {}", "error".red().bold(), e)?,
        }
    }
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Choose an option".green())?;
    writeln!(out, "╔══════════════════════════════════════════╗")?;
    writeln!(out, "║      {}              ║", "1  - Asset summary   ".yellow())?;
    writeln!(out, "║      {}              ║", "2  - Random selection".yellow())?;
    writeln!(out, "║      {}              ║", "3  - Brute force     ".yellow())?;
    writeln!(out, "║      {}              ║", "4  - Greedy          ".yellow())?;
    writeln!(out, "║      {}              ║", "9  - Clear screen    ".cyan())?;
    writeln!(out, "║      {}              ║", "0  - Quit            ".magenta())?;
    writeln!(out, "╚══════════════════════════════════════════╝")?;
    write!(out, "> ")?;
    out.flush()
}

/// Re-prompts until an integer in `1..=universe` arrives.
fn ask_portfolio_size<R: BufRead, W: Write>(
    universe: usize,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<usize>> {
    loop {
        writeln!(
            out,
            "Portfolio size? Choose between {} and {}",
            "1".yellow(),
            universe.to_string().yellow()
        )?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse::<usize>() {
            Ok(size) if (1..=universe).contains(&size) => return Ok(Some(size)),
            _ => continue,
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SessionArgs;
    use std::io::Cursor;

    fn session() -> (tempfile::NamedTempFile, Session) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ativo,preco,valor,dividendo").unwrap();
        for (code, first, last) in [("aaa", 10, 11), ("bbb", 10, 15), ("ccc", 10, 13)] {
            writeln!(file, "{code},{first},{first},0").unwrap();
            writeln!(file, "{code},{last},{last},0").unwrap();
        }
        let args = SessionArgs {
            data: file.path().to_str().unwrap().to_string(),
            scenarios: None,
            seed: Some(3),
            max_combinations: 1_000,
        };
        let session = Session::open(&args).unwrap();
        (file, session)
    }

    fn run(script: &str) -> String {
        let (_file, mut session) = session();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_menu_with(&mut session, &OutputFormat::Json, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_brute_force_flow() {
        let out = run("3\n1\n0\n");
        assert!(out.contains("BBB"), "{out}");
        assert!(!out.contains("AAA"), "{out}");
    }

    #[test]
    fn test_size_is_reprompted_until_valid() {
        let out = run("4\n0\n9\nabc\n2\n0\n");
        assert_eq!(out.matches("Portfolio size?").count(), 4);
        assert!(out.contains("BBB"), "{out}");
        assert!(out.contains("CCC"), "{out}");
    }

    #[test]
    fn test_summary_goes_to_menu_writer() {
        let out = run("1\n0\n");
        for code in ["AAA", "BBB", "CCC"] {
            assert!(out.contains(&format!("\"asset\": \"{code}\"")), "{out}");
        }
        assert!(out.contains("\"result\""), "{out}");
    }

    #[test]
    fn test_clear_screen_sequence() {
        let out = run("9\n0\n");
        assert!(out.contains(CLEAR_SCREEN), "{out:?}");
        assert_eq!(out.matches("Choose an option").count(), 2);
    }

    #[test]
    fn test_invalid_option() {
        let out = run("7\n0\n");
        assert!(out.contains("Invalid option"));
    }

    #[test]
    fn test_end_of_input_leaves_menu() {
        let out = run("2\n");
        assert!(out.contains("Portfolio size?"));
    }
}
