use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "qoiconv", about = "Convert between PNG and QOI images.")]
struct Opt {
    /// Encode a PNG image into a QOI file
    #[structopt(short = "e", long = "encode", value_name = "input", parse(from_os_str))]
    encode: Option<PathBuf>,
    /// Decode a QOI file into a PNG image
    #[structopt(short = "d", long = "decode", value_name = "input", parse(from_os_str))]
    decode: Option<PathBuf>,
    /// Output file path (defaults to the input path with the extension swapped)
    #[structopt(short = "o", long = "output", value_name = "output", parse(from_os_str))]
    output: Option<PathBuf>,
    /// Print image metadata to stderr
    #[structopt(long)]
    verbose: bool,
}

struct Image {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

fn read_png(data: &[u8]) -> Result<Image> {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let bytes = &buf[..info.buffer_size()];
    let channels = info.color_type.samples() as u8;
    ensure!(channels == 3 || channels == 4, "invalid channels: {}", channels);
    ensure!(info.bit_depth == png::BitDepth::Eight, "unsupported bit depth: {:?}", info.bit_depth);
    Ok(Image { width: info.width, height: info.height, channels, data: bytes.to_vec() })
}

fn write_png(filename: &Path, img: &Image) -> Result<()> {
    let file = fs::File::create(filename)?;
    let mut encoder = png::Encoder::new(file, img.width, img.height);
    encoder.set_color(if img.channels == 4 { png::ColorType::Rgba } else { png::ColorType::Rgb });
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&img.data)?;
    Ok(())
}

fn encode(input: &Path, output: Option<PathBuf>, verbose: bool) -> Result<()> {
    let raw =
        fs::read(input).with_context(|| format!("failed to read '{}'", input.display()))?;
    ensure!(!raw.starts_with(b"qoif"), "'{}' is already in QOI format", input.display());

    let img = read_png(&raw).with_context(|| format!("failed to read '{}'", input.display()))?;
    if verbose {
        eprintln!("{}: {}x{}, {} channels", input.display(), img.width, img.height, img.channels);
    }

    let output = output.unwrap_or_else(|| input.with_extension("qoi"));
    let n_bytes = qoif::encode_to_file(&img.data, img.width, img.height, img.channels, 0, &output)
        .with_context(|| format!("failed to encode '{}'", input.display()))?;
    if verbose {
        eprintln!("{}: {} bytes written", output.display(), n_bytes);
    }
    Ok(())
}

fn decode(input: &Path, output: Option<PathBuf>, verbose: bool) -> Result<()> {
    let (header, data) = qoif::decode_from_file(input)
        .with_context(|| format!("failed to decode '{}'", input.display()))?;
    if verbose {
        eprintln!(
            "{}: {}x{}, {} channels, {}",
            input.display(),
            header.width,
            header.height,
            header.channels.as_u8(),
            if header.colorspace.is_srgb() { "sRGB" } else { "linear" }
        );
    }

    let output = output.unwrap_or_else(|| input.with_extension("png"));
    let img = Image {
        width: header.width,
        height: header.height,
        channels: header.channels.as_u8(),
        data,
    };
    write_png(&output, &img).with_context(|| format!("failed to write '{}'", output.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    match (opt.encode, opt.decode) {
        (Some(input), None) => encode(&input, opt.output, opt.verbose),
        (None, Some(input)) => decode(&input, opt.output, opt.verbose),
        (Some(_), Some(_)) => bail!("options -e and -d are mutually exclusive"),
        (None, None) => bail!("no input file specified (use -e or -d)"),
    }
}
