use anyhow::{anyhow, Result};
use simple_logger::SimpleLogger;
use std::fs;
use verbatim_css3::parser_config::ParserConfig;
use verbatim_css3::stringify::stringify;
use verbatim_css3::tokenizer::Tokenizer;
use verbatim_css3::walker::Walker;
use verbatim_css3::Css3;
use verbatim_shared::byte_stream::{ByteStream, Location, Stream};
use verbatim_shared::errors::CssError;

fn main() -> Result<()> {
    let matches = clap::Command::new("Verbatim CSS3 parser")
        .version("0.1.0")
        .arg(
            clap::Arg::new("file")
                .help("The file to parse")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("tokens")
                .help("Just print the tokens")
                .long("tokens")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("json")
                .help("Print the tree as JSON")
                .long("json")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("replay")
                .help("Print the source as written back from the tree")
                .long("replay")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("quiet")
                .help("Don't display AST")
                .long("quiet")
                .short('q')
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let debug = matches.get_flag("debug");
    let quiet = matches.get_flag("quiet");
    let file = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow!("missing file argument"))?
        .to_string();

    if debug {
        SimpleLogger::new().init()?;
    }

    let css = fs::read_to_string(&file)?;
    log::debug!("read {} bytes from {}", css.len(), file);

    if matches.get_flag("tokens") {
        print_tokens(&css);
        return Ok(());
    }

    let config = ParserConfig {
        source: Some(file),
        ..Default::default()
    };

    let node = match Css3::parse_str(&css, config) {
        Ok(node) => node,
        Err(err) => {
            display_snippet(&css, &err);
            return Err(anyhow!(err));
        }
    };

    if quiet {
        return Ok(());
    }

    if matches.get_flag("json") {
        println!("{}", node.to_json()?);
    } else if matches.get_flag("replay") {
        print!("{}", stringify(&node));
    } else {
        Walker::new(&node).walk_stdout();
    }

    Ok(())
}

fn display_snippet(css: &str, err: &CssError) {
    let lines: Vec<&str> = css.split('\n').collect();
    let line_nr = err.location.line.saturating_sub(1);
    let col_nr = err.location.column.saturating_sub(1);

    if col_nr > 1000 {
        println!("Error is too far to the right to display.");
        return;
    }

    // Print the previous 5 lines
    println!();
    println!();
    for n in line_nr.saturating_sub(5)..line_nr {
        println!("{:<5}|{}", n + 1, lines.get(n).unwrap_or(&""));
    }

    // Print the line with the error and a pointer to the error
    println!("{:<5}|{}", line_nr + 1, lines.get(line_nr).unwrap_or(&""));
    println!("-----{}^", "-".repeat(col_nr + 1));

    // Print the next 5 lines
    for n in line_nr + 1..line_nr + 6 {
        if let Some(line) = lines.get(n) {
            println!("{:<5}|{}", n + 1, line);
        }
    }
    println!("{err}");
    println!();
}

fn print_tokens(css: &str) {
    let mut stream = ByteStream::new();
    stream.read_from_str(css);
    stream.close();

    let mut tokenizer = Tokenizer::new(&stream, Location::default());
    loop {
        let token = tokenizer.next_token();
        println!("{:?} {:?} {:?}", token.location, token.token_type, token.raw);

        if token.is_eof() {
            break;
        }
    }
}
