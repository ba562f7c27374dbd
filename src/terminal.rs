//! Line-oriented terminal play loop.

use anyhow::Result;
use mindmatch::{GameController, GameEvent, GameStatus, Session, WordId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

/// A parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Toggle the words at these 1-based board positions.
    Toggle(Vec<usize>),
    /// Submit the selection.
    Submit,
    /// Shuffle the board.
    Shuffle,
    /// Deselect everything.
    Clear,
    /// Give up and load a new puzzle on the same topic.
    Resign,
    /// Start a new puzzle, optionally on a new topic.
    New(Option<String>),
    /// Change the topic without starting.
    Topic(String),
    /// List topics.
    Topics,
    /// Show help.
    Help,
    /// Leave the game.
    Quit,
}

impl Input {
    /// Parses one line. Returns `None` for input that is not a command.
    #[instrument]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let input = match head.to_lowercase().as_str() {
            "" => return None,
            "s" | "submit" => Input::Submit,
            "sh" | "shuffle" => Input::Shuffle,
            "c" | "clear" | "deselect" => Input::Clear,
            "r" | "resign" => Input::Resign,
            "n" | "new" | "start" => {
                Input::New((!rest.is_empty()).then(|| rest.to_string()))
            }
            "t" | "topic" if !rest.is_empty() => Input::Topic(rest.to_string()),
            "topics" => Input::Topics,
            "h" | "help" | "?" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            _ => {
                let positions = line
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|part| !part.is_empty())
                    .map(str::parse::<usize>)
                    .collect::<Result<Vec<_>, _>>()
                    .ok()?;
                Input::Toggle(positions)
            }
        };
        Some(input)
    }
}

const HELP: &str = "\
Commands:
  1 5 9 12      toggle words by board number
  s, submit     submit the 4 selected words
  sh, shuffle   shuffle the board
  c, clear      deselect all
  r, resign     give up and load a new puzzle
  n [topic]     new puzzle (optionally on a new topic)
  t <topic>     change topic
  topics        list suggested topics
  q, quit       leave";

/// Runs the game until the player quits or input ends.
#[instrument(skip_all)]
pub async fn run(controller: &GameController, topics: &[String]) -> Result<()> {
    println!("MindMatch: group words by their hidden connections.");
    println!("{}", HELP);

    let session = controller.session().await;
    println!("\nTopic: {}. Type 'n' to start or 'n <topic>' for another.", session.topic());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(input) = Input::parse(&line) else {
            println!("Unknown command. Type 'help' for the list.");
            continue;
        };
        debug!(?input, "Player input");

        let session = match input {
            Input::Quit => break,
            Input::Help => {
                println!("{}", HELP);
                continue;
            }
            Input::Topics => {
                for topic in topics {
                    println!("  {}", topic);
                }
                continue;
            }
            Input::Topic(topic) => {
                let session = controller.set_topic(&topic).await;
                if session.topic() != topic.trim() {
                    println!("Finish or resign this puzzle first, or use `n <topic>`.");
                }
                println!("Topic: {}", session.topic());
                continue;
            }
            Input::New(topic) => {
                let topic = topic.unwrap_or_default();
                println!("Crafting your puzzle...");
                controller.start_game(&topic).await
            }
            Input::Resign => {
                println!("Resigning. Crafting a new puzzle...");
                controller.resign().await
            }
            Input::Toggle(positions) => {
                let mut session = controller.session().await;
                let ids: Vec<WordId> = positions
                    .iter()
                    .filter_map(|p| p.checked_sub(1))
                    .filter_map(|i| session.active_words().get(i).map(|w| *w.id()))
                    .collect();
                for id in ids {
                    session = controller.toggle_word(id).await;
                }
                session
            }
            Input::Clear => controller.clear_selection().await,
            Input::Shuffle => controller.shuffle().await,
            Input::Submit => {
                let (outcome, session) = controller.submit_guess().await?;
                if outcome.is_none() && session.status() == GameStatus::Playing {
                    println!("Select exactly 4 words first.");
                }
                session
            }
        };

        for event in controller.take_events().await {
            print_event(&event);
        }
        render(&session);
    }

    Ok(())
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::LoadStarted { .. } | GameEvent::StaleResponseDiscarded { .. } => {}
        GameEvent::OneAway => println!(">> {}", event),
        _ => println!("{}", event),
    }
}

/// Prints solved rows, the board and the lives counter.
fn render(session: &Session) {
    println!();
    for category in session.solved_categories() {
        println!(
            "[{}] {}: {}",
            category.color(),
            category.name(),
            category.words().join(", ")
        );
        if !category.description().is_empty() {
            println!("    {}", category.description());
        }
    }

    for (row, chunk) in session.board().chunks(4).enumerate() {
        let cells: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(col, view)| {
                let marker = if view.is_selected { '*' } else { ' ' };
                format!("{:>2}{}{:<16}", row * 4 + col + 1, marker, view.entry.text())
            })
            .collect();
        println!("{}", cells.join(" "));
    }

    let hearts = "\u{25CF}".repeat(usize::from(session.lives()));
    let empty = "\u{25CB}".repeat(usize::from(session.max_lives() - session.lives()));
    println!(
        "\nMistakes remaining: {}{}   Topic: {}   [{}]",
        hearts,
        empty,
        session.topic(),
        session.status()
    );

    match session.status() {
        GameStatus::Idle => {
            if let Some(error) = session.last_error() {
                println!("{}", error);
            }
            println!("Type 'n' to start.");
        }
        GameStatus::Won | GameStatus::Lost => println!("Type 'n' to play again."),
        GameStatus::Loading | GameStatus::Playing => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positions() {
        assert_eq!(Input::parse("1 5, 9 12"), Some(Input::Toggle(vec![1, 5, 9, 12])));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("submit"), Some(Input::Submit));
        assert_eq!(Input::parse(" SH "), Some(Input::Shuffle));
        assert_eq!(Input::parse("n"), Some(Input::New(None)));
        assert_eq!(
            Input::parse("new Food & Drink"),
            Some(Input::New(Some("Food & Drink".to_string())))
        );
        assert_eq!(Input::parse("t Space"), Some(Input::Topic("Space".to_string())));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Input::parse("banana"), None);
        assert_eq!(Input::parse("topic"), None);
        assert_eq!(Input::parse(""), None);
    }
}
