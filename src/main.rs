//! riichi-score - Riichi Mahjong hand scoring calculator.
//!
//! A command-line front end over `riichi_score`: parses a hand notation
//! string, builds the situational context from flags, and prints the
//! resulting score.

use std::process;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use riichi_score::context::{ContextInput, RuleSet, WinType};
use riichi_score::display::{format_score_report, format_structure};
use riichi_score::error::ScoringError;
use riichi_score::meld::HandInput;
use riichi_score::parse::parse_hand_notation;
use riichi_score::partition::enumerate;
use riichi_score::scoring::score;
use riichi_score::tile::{parse_tile_token, Honor};

const AFTER_HELP: &str = r#"HAND FORMAT:
    Tile literals: 1m..9m / 1p..9p / 1s..9s, 5mr/5pr/5sr for a red five,
    E/S/W/N/P/F/C for honors (East/South/West/North/White/Green/Red dragon).
    No separator is required between literals.

    The hand argument is every tile EXCEPT the winning tile: any called
    melds in brackets, followed by the remaining concealed tiles. Pass the
    winning tile separately with -w/--win; it is always added back in.

    (123m)   open sequence (chi)
    (111m)   open triplet (pon)
    [1111m]  closed kan (ankan)
    <1111m>  open kan (daiminkan)
    {1111m}  added kan (kakan)

EXAMPLES:
    riichi-score 1m3m4p5p6p7p8p9p1s2s3sEE -w 2m
    riichi-score "(1p1p1p)4p5p6p7p8p9p1s2s3sE" -w E --tsumo
    riichi-score "[1m1m1m1m]2p3p4p5p6p7p8p9pEE" -w 8p --riichi"#;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
}

#[derive(Parser)]
#[command(name = "riichi-score")]
#[command(version)]
#[command(styles = styles())]
#[command(about = "Riichi Mahjong hand scoring calculator")]
#[command(after_help = AFTER_HELP)]
struct Args {
    /// Hand notation: any bracketed melds plus the concealed tiles, not
    /// including the winning tile (see -w/--win).
    hand: String,

    /// The winning tile.
    #[arg(short = 'w', long = "win")]
    winning_tile: String,

    /// Win by self-draw (default: ron).
    #[arg(short, long)]
    tsumo: bool,

    /// Riichi declared.
    #[arg(short, long)]
    riichi: bool,

    /// Double riichi (first uninterrupted discard).
    #[arg(long)]
    double_riichi: bool,

    /// Ippatsu (win within one go-around of riichi, no calls in between).
    #[arg(long)]
    ippatsu: bool,

    /// Round wind: e/s/w/n.
    #[arg(long, default_value = "e")]
    round: String,

    /// Seat wind: e/s/w/n.
    #[arg(long, default_value = "e")]
    seat: String,

    /// Dora indicators, concatenated (e.g. "1mE").
    #[arg(short, long, default_value = "")]
    dora: String,

    /// Ura dora indicators, concatenated (riichi hands only).
    #[arg(long, default_value = "")]
    ura: String,

    /// Win on the last drawable/discardable tile (haitei/houtei).
    #[arg(long)]
    last_tile: bool,

    /// Win on a kan's replacement tile (rinshan).
    #[arg(long)]
    rinshan: bool,

    /// Ron on another player's added kan (chankan).
    #[arg(long)]
    chankan: bool,

    /// Dealer's uninterrupted first draw win.
    #[arg(long)]
    tenhou: bool,

    /// Non-dealer's uninterrupted first draw win.
    #[arg(long)]
    chiihou: bool,

    /// Disallow tanyao on an open hand.
    #[arg(long)]
    no_kuitan: bool,

    /// Allow a second yakuman (e.g. suuankou tanki, pure chuuren) to count double.
    #[arg(long)]
    double_yakuman: bool,

    /// Honba bonus sticks on the table.
    #[arg(long, default_value_t = 0)]
    honba: u32,

    /// Riichi deposit sticks on the table.
    #[arg(long, default_value_t = 0)]
    kyotaku: u32,

    /// Use ASCII tile notation instead of Unicode glyphs.
    #[arg(long)]
    ascii: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

fn parse_wind(s: &str) -> Result<Honor, String> {
    match s.to_ascii_lowercase().as_str() {
        "e" => Ok(Honor::East),
        "s" => Ok(Honor::South),
        "w" => Ok(Honor::West),
        "n" => Ok(Honor::North),
        _ => Err(format!("invalid wind '{s}': expected one of e/s/w/n")),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "error:".red().bold(), message);
    process::exit(1);
}

#[derive(Serialize)]
struct JsonReport {
    structure: String,
    result: riichi_score::scoring::ScoreResult,
}

fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let (melds, parsed) = parse_hand_notation(&args.hand).unwrap_or_else(|e| fail(e));
    let (win_tile, win_is_aka) = parse_tile_token(&args.winning_tile).unwrap_or_else(|e| fail(e));

    let mut closed_tiles = parsed.tiles;
    closed_tiles.push(win_tile);

    let mut aka_count = parsed.aka_count;
    if win_is_aka {
        aka_count += 1;
    }

    let hand = HandInput { closed_tiles, melds, win_tile };

    let round_wind = parse_wind(&args.round).unwrap_or_else(|e| fail(e));
    let seat_wind = parse_wind(&args.seat).unwrap_or_else(|e| fail(e));
    let win_type = if args.tsumo { WinType::Tsumo } else { WinType::Ron };

    let dora_indicators = riichi_score::parse::parse_tiles(&args.dora).unwrap_or_else(|e| fail(e)).tiles;
    let ura_dora_indicators = riichi_score::parse::parse_tiles(&args.ura).unwrap_or_else(|e| fail(e)).tiles;

    let mut context = ContextInput::new(win_type, round_wind, seat_wind).with_aka(aka_count);
    if args.double_riichi {
        context = context.double_riichi();
    } else if args.riichi {
        context = context.riichi();
    }
    if args.ippatsu {
        context = context.ippatsu();
    }
    if args.rinshan {
        context = context.rinshan();
    }
    if args.chankan {
        context = context.chankan();
    }
    if args.tenhou {
        context = context.tenhou();
    }
    if args.chiihou {
        context = context.chiihou();
    }
    if args.last_tile {
        match win_type {
            WinType::Tsumo => context.haitei = true,
            WinType::Ron => context.houtei = true,
        }
    }
    context = context.with_dora(dora_indicators).with_ura_dora(ura_dora_indicators);
    context = context.with_honba(args.honba).with_kyotaku(args.kyotaku);

    let rules = RuleSet { kuitan_ari: !args.no_kuitan, double_yakuman_ari: args.double_yakuman, ..RuleSet::default() };

    let result = match score(&hand, &context, &rules) {
        Ok(result) => result,
        Err(ScoringError::NoYaku) => fail("no yaku: dora alone cannot win a hand"),
        Err(e) => fail(e),
    };

    let structures = enumerate(&hand.closed_tiles, &hand.melds);
    let structure = structures.first();

    if args.json {
        let structure_str = structure.map(|s| format_structure(s, !args.ascii)).unwrap_or_default();
        let report = JsonReport { structure: structure_str, result };
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
        return;
    }

    if let Some(structure) = structure {
        println!("{}", format_structure(structure, !args.ascii));
    }
    println!("{}", format_score_report(&result));
}
