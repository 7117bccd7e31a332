use clap::{Parser, Subcommand};
use frf_engine::{FrfFont, PbmImage, decode, encode};
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(version, about = "Create and inspect FRF bitmap fonts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create an FRF font from a PBM image")]
    Make {
        #[arg(help = "PBM image to convert from")]
        input: PathBuf,

        #[arg(help = "File to output to")]
        output: PathBuf,

        #[arg(help = "Character cell width (1-8)")]
        width: u8,

        #[arg(help = "Character cell height (1-10)")]
        height: u8,

        #[arg(help = "Character map (whitespace separated hex Unicode codepoints)", short, long, value_name = "map.txt")]
        map: Option<PathBuf>,

        #[arg(help = "Character width map (whitespace separated integers)", short, long, value_name = "widths.txt")]
        widths: Option<PathBuf>,
    },

    #[command(about = "Print metadata and glyph inventory of a font")]
    Info {
        #[arg(help = "FRF font to inspect")]
        font: PathBuf,
    },

    #[command(about = "Render a text string as character blocks")]
    Show {
        #[arg(help = "FRF font to render with")]
        font: PathBuf,

        #[arg(help = "Text to render")]
        text: String,
    },
}

fn main() {
    // The handle has to stay alive for the duration of the program.
    let _logger = flexi_logger::Logger::try_with_env_or_str("info").and_then(flexi_logger::Logger::start);

    let args = Cli::parse();
    let result = match args.command {
        Commands::Make {
            input,
            output,
            width,
            height,
            map,
            widths,
        } => make(&input, &output, width, height, map, widths.as_deref()),
        Commands::Info { font } => info(&font),
        Commands::Show { font, text } => show(&font, &text),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn make(input: &std::path::Path, output: &std::path::Path, width: u8, height: u8, map: Option<PathBuf>, widths: Option<&std::path::Path>) -> frf_engine::Result<()> {
    let image = PbmImage::from_bytes(&fs::read(input)?)?;

    // Without an explicit map, a .txt file next to the image is used.
    let map = map.or_else(|| {
        let candidate = input.with_extension("txt");
        if candidate.exists() {
            log::info!("Using {} for font mappings", candidate.display());
            Some(candidate)
        } else {
            None
        }
    });

    let map_text = map.map(fs::read_to_string).transpose()?;
    let widths_text = widths.map(fs::read_to_string).transpose()?;

    let (font, _notices) = FrfFont::build(&image, width, height, map_text.as_deref(), widths_text.as_deref())?;
    fs::write(output, encode(&font))?;
    log::info!("{} created ({} glyphs)", output.display(), font.len());
    Ok(())
}

fn info(path: &std::path::Path) -> frf_engine::Result<()> {
    let font = decode(&fs::read(path)?)?;
    println!("{}: {}x{} cells, {} glyphs, {}", path.display(), font.cell_width(), font.cell_height(), font.len(), if font.is_proportional() { "proportional" } else { "monospaced" });

    for glyph in font.glyphs() {
        let printable = char::from_u32(glyph.codepoint as u32).filter(|c| !c.is_control()).unwrap_or('\u{FFFD}');
        println!("  U+{:04X} {printable} width {}", glyph.codepoint, glyph.width);
    }
    Ok(())
}

fn show(path: &std::path::Path, text: &str) -> frf_engine::Result<()> {
    let font = decode(&fs::read(path)?)?;

    // Substituting for unmapped characters is on us: prefer the
    // replacement character if the font has one, then '?'.
    let fallback = font.glyph('\u{FFFD}').or_else(|| font.glyph('?'));

    for y in 0..font.line_height() as usize {
        let mut line = String::new();
        for ch in text.chars() {
            let Some(glyph) = font.glyph(ch).or(fallback) else {
                continue;
            };
            for x in 0..glyph.width as usize {
                line.push(if glyph.pixel(x, y) { '█' } else { ' ' });
            }
        }
        println!("{}", line.trim_end());
    }
    Ok(())
}
