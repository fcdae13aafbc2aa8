/// Config file used when neither `STARFIELD_CONFIG` nor a path argument is
/// given.
pub const DEFAULT_CONFIG_PATH: &str = "assets/game.json";

pub const USAGE: &str = "usage: starfield-headless [CONFIG] [--ticks N] [--size WIDTHxHEIGHT]";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub config_path: String,
    pub max_ticks: Option<u64>,
    pub width: f64,
    pub height: f64,
}

impl Args {
    /// Parse the arguments after the program name. `default_config` is used
    /// when no path is given. Malformed values and unknown flags are errors.
    pub fn parse<I>(args: I, default_config: String) -> Result<Args, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args {
            config_path: default_config,
            max_ticks: None,
            width: 800.0,
            height: 600.0,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--ticks" => {
                    let value = args.next().ok_or("--ticks needs a value")?;
                    let ticks = value
                        .parse()
                        .map_err(|_| format!("--ticks expects a whole number, got {:?}", value))?;
                    parsed.max_ticks = Some(ticks);
                }
                "--size" => {
                    let value = args.next().ok_or("--size needs a value")?;
                    let (w, h) = parse_size(&value)
                        .ok_or_else(|| format!("--size expects WIDTHxHEIGHT, got {:?}", value))?;
                    parsed.width = w;
                    parsed.height = h;
                }
                flag if flag.starts_with('-') => {
                    return Err(format!("unknown argument {:?}", flag));
                }
                path => parsed.config_path = path.to_string(),
            }
        }
        Ok(parsed)
    }
}

fn parse_size(value: &str) -> Option<(f64, f64)> {
    let (w, h) = value.split_once('x')?;
    let w: f64 = w.parse().ok()?;
    let h: f64 = h.parse().ok()?;
    (w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()).then_some((w, h))
}
