use clap::Parser;
use config::Config;
use dictionary::{Dictionary, Locale};
use game::{DefinitionSource, Game, Notice, Phase, Session};
use share::share_text;
use tracing_subscriber::EnvFilter;
use utilities::{input, today};
use words::{SelectionMode, WordList, WordListKind, WordSelector};

mod config;
mod game;
mod share;
mod utilities;
mod words;

/// Lookup warnings would interleave with the game text, so only errors by default.
const DEFAULT_LOG_FILTER: &str = "error";

#[derive(Debug, Parser)]
#[command(name = "daily-define", about = "Guess the word from its dictionary definition")]
struct Args {
    /// Word list to draw from, unless DAILY_DEFINE_WORDS is set
    #[arg(long, value_enum, default_value_t = WordListKind::Common)]
    words: WordListKind,
    /// How the word is picked
    #[arg(long, value_enum, default_value_t = SelectionMode::Daily)]
    mode: SelectionMode,
    /// Locale to look the word up in, repeat to fall back (overrides DAILY_DEFINE_LOCALES)
    #[arg(long = "locale")]
    locales: Vec<Locale>,
    /// Log requests and responses to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();
    init_logging(args.verbose);

    let mut config = Config::from_env()?;
    if !args.locales.is_empty() {
        config.locales = args.locales;
    }
    let dict = Dictionary::new(config.base_url, config.credentials).with_locales(config.locales);
    let words = config
        .words
        .unwrap_or_else(|| WordList::builtin(args.words));
    let selector = WordSelector::new(words, args.mode);
    let game = Game::new(dict, selector).require_definition(config.require_definition);

    println!("Daily Define");
    println!("Guess the word based on its definition! A new word is available every day.");
    println!("Type 'help' to see the commands.");

    let turn = game.start(today()).await;
    print_notices(&turn.notices);
    let mut session = turn.session;
    loop {
        let Some(line) = input(">> ")? else {
            break;
        };
        let line = line.trim();
        let mut command_parts = line.split_ascii_whitespace();
        let Some(command) = command_parts.next() else {
            continue;
        };
        let turn = match command {
            "exit" | "quit" | "q" => {
                break;
            }
            "help" | "?" => {
                print_help();
                continue;
            }
            "definition" | "d" => {
                print_round(&game, &session);
                continue;
            }
            "share" => {
                print_share(&session);
                continue;
            }
            "reload" | "r" => game.reload(session, today()).await,
            "clue" | "hint" => game.reveal_clue(session),
            "guess" | "g" => {
                let guess = command_parts.collect::<Vec<&str>>().join(" ");
                if guess.is_empty() {
                    println!("Type your guess after the command, e.g. 'guess apple'.");
                    continue;
                }
                game.submit(session, &guess)
            }
            _ => game.submit(session, line),
        };
        print_notices(&turn.notices);
        session = turn.session;
        if turn
            .notices
            .iter()
            .any(|notice| matches!(notice, Notice::Correct | Notice::Incorrect { .. }))
        {
            print_share(&session);
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("daily_define=debug,dictionary=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!("Commands:");
    println!("    <word> | guess <word>   submit a guess");
    println!("    clue                    reveal the next clue");
    println!("    definition              show the definition again");
    println!("    reload                  pick a new word");
    println!("    share                   show the shareable result");
    println!("    quit                    leave the game");
}

fn print_round<S: DefinitionSource>(game: &Game<S>, session: &Session) {
    match &session.definition {
        Some(definition) => println!("Definition: {definition}"),
        None => println!("There is no definition for this round."),
    }
    for clue in session.revealed_clues() {
        println!("    {clue}");
    }
    if game.phase(session) == Phase::Resolved {
        println!("The word was {}.", session.daily_word);
    }
}

fn print_share(session: &Session) {
    match share_text(session.outcome, session.date) {
        Some(text) => {
            println!("Share your result:");
            println!("----------------------------------------");
            println!("{text}");
            println!("----------------------------------------");
        }
        None => println!("Make a guess first."),
    }
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        print_notice(notice);
    }
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Definition(definition) => println!("Definition: {definition}"),
        Notice::DefinitionUnavailable {
            reason,
            status,
            revealed_word,
        } => {
            match status {
                Some(code) => println!("Could not fetch the definition (status code {code})."),
                None => println!("Could not fetch the definition: {reason}."),
            }
            if let Some(word) = revealed_word {
                println!("The word for today was: {word}");
                println!("Type 'reload' to try another word.");
            }
        }
        Notice::Correct => println!("🎉 Correct! Well done!"),
        Notice::Incorrect { word, near_miss } => {
            if *near_miss {
                println!("So close!");
            }
            println!("❌ Wrong! The correct word was {word}.");
        }
        Notice::RoundStopped { word } => {
            println!("There is no definition to guess from. The word was {word}.")
        }
        Notice::AlreadyResolved(outcome) => println!(
            "You already guessed ({}). Type 'reload' for a new word.",
            outcome.label().unwrap_or("no guess")
        ),
        Notice::Clue(clue) => println!("Clue: {clue}"),
        Notice::NoMoreClues => println!("No more clues for this word."),
        Notice::CluesUnavailable => println!("Clues are only available while you are guessing."),
    }
}
