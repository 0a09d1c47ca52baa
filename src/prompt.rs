//! Interactive front end.
//!
//! Walks the user through node count, density bands, role counts and domain,
//! re-asking whenever an answer fails validation. Reads from any `BufRead`
//! and writes to any `Write`, so the whole dialogue can be driven from a
//! script in tests.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use color_eyre::eyre::{eyre, Result};

use crate::config::{Config, DEFAULT_NODES};
use crate::roles::{default_role_distribution, Role};
use crate::topology::{count_subnets, default_bands, DensityBand, SMALL_NETWORK_THRESHOLD};
use crate::utils::validation::{
    validate_band, validate_band_capacity, validate_domain, validate_node_count,
    validate_role_count,
};

/// Line-oriented question/answer helper
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Print a line of output
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Ask a question; blank answers come back as `None`
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(eyre!("Input closed before the configuration was complete"));
        }
        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    /// Ask for a non-negative number, re-asking until one parses
    pub fn ask_number<T>(&mut self, question: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy,
    {
        loop {
            match self.ask(question)? {
                None => return Ok(default),
                Some(answer) => match answer.parse::<T>() {
                    Ok(value) => return Ok(value),
                    Err(_) => self.say(&format!("Illegal value ({})", answer))?,
                },
            }
        }
    }

    /// Ask a yes/no question
    pub fn ask_yes_no(&mut self, question: &str, default: bool) -> Result<bool> {
        loop {
            match self.ask(question)?.map(|a| a.to_ascii_lowercase()) {
                None => return Ok(default),
                Some(a) if a == "y" || a == "yes" => return Ok(true),
                Some(a) if a == "n" || a == "no" => return Ok(false),
                Some(a) => self.say(&format!("Please answer yes or no ({})", a))?,
            }
        }
    }
}

/// Run the interactive dialogue, starting from `base` and returning the
/// configuration the user settled on
pub fn run_interactive<R: BufRead, W: Write>(input: R, output: W, base: Config) -> Result<Config> {
    let mut prompter = Prompter::new(input, output);
    prompter.say("\n\n\tSYNTHETIC NETWORK NODE GENERATOR\n")?;

    loop {
        let mut config = base.clone();

        let (nodes, bands) = loop {
            let nodes = ask_node_count(&mut prompter)?;
            match ask_bands(&mut prompter, nodes)? {
                BandChoice::Defaults => break (nodes, None),
                BandChoice::Manual(bands) => break (nodes, Some(bands)),
                BandChoice::ChangeNodeCount => continue,
            }
        };
        config.general.nodes = nodes;
        config.network.bands = bands;
        config.roles = ask_roles(&mut prompter, nodes)?;
        config.network.domain = ask_domain(&mut prompter)?;

        if prompter.ask_yes_no("Ready to generate json (No to start over)? [Yes]: ", true)? {
            return Ok(config);
        }
    }
}

/// Outcome of the band questions
enum BandChoice {
    Defaults,
    Manual(Vec<DensityBand>),
    /// The node count does not fit the default bands and the user wants
    /// to pick another one
    ChangeNodeCount,
}

fn ask_node_count<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<usize> {
    loop {
        let question = format!("How many network nodes? [{}]: ", DEFAULT_NODES);
        let nodes = prompter.ask_number(&question, DEFAULT_NODES)?;
        match validate_node_count(nodes) {
            Ok(()) => return Ok(nodes),
            Err(e) => prompter.say(&e.to_string())?,
        }
    }
}

fn ask_bands<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    nodes: usize,
) -> Result<BandChoice> {
    if nodes <= SMALL_NETWORK_THRESHOLD {
        prompter.say("Total subnets: 1")?;
        return Ok(BandChoice::Defaults);
    }

    let defaults = default_bands(nodes);
    prompter.say(&format!("Default Node distribution of {} nodes across Class C subnets: ", nodes))?;
    for band in &defaults {
        prompter.say(&format!(
            "   {}% of the nodes will occupy subnets that are {}% populated",
            band.node_percent, band.density_percent
        ))?;
    }
    prompter.say(&format!("Total subnets: {}", count_subnets(nodes, &defaults)?))?;

    match validate_band_capacity(nodes, &defaults) {
        Ok(()) => {
            if !prompter.ask_yes_no("Manually set network node distribution? [No]: ", false)? {
                return Ok(BandChoice::Defaults);
            }
        }
        Err(e) => {
            prompter.say(&format!("WARNING: {}", e))?;
            if !prompter.ask_yes_no(
                "Manually set network node distribution (No to pick another node count)? [Yes]: ",
                true,
            )? {
                return Ok(BandChoice::ChangeNodeCount);
            }
        }
    }

    loop {
        let bands = ask_band_list(prompter, nodes)?;
        match validate_band_capacity(nodes, &bands) {
            Ok(()) => {
                prompter.say(&format!("Total subnets: {}", count_subnets(nodes, &bands)?))?;
                return Ok(BandChoice::Manual(bands));
            }
            Err(e) => {
                prompter.say(&format!("Illegal distribution: {}", e))?;
                prompter.say("Please enter the bands again")?;
            }
        }
    }
}

/// Read bands until their node percentages reach 100
fn ask_band_list<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    nodes: usize,
) -> Result<Vec<DensityBand>> {
    prompter.say(&format!(
        "Please enter what percentage of the {} nodes would consume what percentage",
        nodes
    ))?;
    prompter.say("of the Class C address space...")?;

    let mut bands = Vec::new();
    let mut remaining = 100u32;
    while remaining > 0 {
        let node_percent = prompter.ask_number(&format!("   Percent of nodes (MAX={}): ", remaining), remaining)?;
        let density_percent = prompter.ask_number("   Percent of class C space occupied: ", 100u32)?;
        let band = DensityBand::new(node_percent, density_percent);

        match validate_band(bands.len() + 1, &band, remaining) {
            Ok(()) => {
                remaining -= node_percent;
                bands.push(band);
            }
            Err(e) => prompter.say(&format!("Illegal band: {}", e))?,
        }
    }
    Ok(bands)
}

fn ask_roles<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    nodes: usize,
) -> Result<BTreeMap<Role, usize>> {
    let defaults = default_role_distribution(nodes);
    prompter.say(&format!("Default Device Role Distribution for {} nodes", nodes))?;
    for (role, count) in defaults.iter() {
        prompter.say(&format!("  {:>30} : {}", role.name(), count))?;
    }

    let mut overrides = BTreeMap::new();
    if !prompter.ask_yes_no("Manually reset the above Device Role Distribution? [No]: ", false)? {
        return Ok(overrides);
    }

    let mut remaining = nodes;
    for role in Role::ALL {
        if remaining == 0 {
            overrides.insert(role, 0);
            continue;
        }
        let suggested = defaults.get(role).min(remaining);
        loop {
            let question = format!("   {} (MAX={}) [{}]: ", role.name(), remaining, suggested);
            let count = prompter.ask_number(&question, suggested)?;
            match validate_role_count(role.name(), count, remaining) {
                Ok(()) => {
                    overrides.insert(role, count);
                    remaining -= count;
                    break;
                }
                Err(e) => prompter.say(&format!("Illegal value: {}", e))?,
            }
        }
    }

    Ok(overrides)
}

/// Returns `None` when the user wants a generated domain
fn ask_domain<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Option<String>> {
    loop {
        match prompter.ask("Domain name to use (press ENTER to auto-generate): ")? {
            None => return Ok(None),
            Some(domain) => match validate_domain(&domain) {
                Ok(()) => return Ok(Some(domain)),
                Err(e) => prompter.say(&e.to_string())?,
            },
        }
    }
}
