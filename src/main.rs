use pokedex_evolutions::detail::{DisplayedDetail, FormCycle};
use pokedex_evolutions::display::NO_EVOLUTION_LABEL;
use pokedex_evolutions::pokedex::neighbours;
use pokedex_evolutions::{
    build_panel, normalize, ChainSource, Entry, EvolutionPanel, Identity, PanelInputs, PokedexFilter,
    PokedexResult, Region, ResolvedEvolution, Resolver, ResolverOptions, RuleTable,
    SnapshotDir, SpeciesSource,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: pokedex-evolutions <snapshot-dir> <species-id> [region] [--debug] [--rules <file.ron>]";

struct Args {
    snapshot_dir: PathBuf,
    species_id: u32,
    region: Option<Region>,
    debug: bool,
    rules: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut debug = false;
    let mut rules = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--debug" => debug = true,
            "--rules" => {
                let path = args.next().ok_or("--rules needs a file")?;
                rules = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let snapshot_dir = positional.next().map(PathBuf::from).ok_or(USAGE)?;
    let species_id = positional
        .next()
        .ok_or(USAGE)?
        .parse::<u32>()
        .map_err(|e| format!("invalid species id: {}", e))?;
    let region = positional
        .next()
        .map(|tag| Region::from_str(&tag).map_err(|_| format!("unknown region: {}", tag)))
        .transpose()?;

    Ok(Args {
        snapshot_dir,
        species_id,
        region,
        debug,
        rules,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> PokedexResult<()> {
    let snapshots = SnapshotDir::new(args.snapshot_dir.clone());
    let entries = normalize(&snapshots.species_list()?)?;

    let custom_table;
    let table: &RuleTable = match &args.rules {
        Some(path) => {
            custom_table = RuleTable::from_ron_file(path)?;
            &custom_table
        }
        None => RuleTable::builtin()?,
    };
    for overlap in table.ambiguities() {
        tracing::warn!(
            near = %overlap.near_slug,
            far = %overlap.far_slug,
            direction = %overlap.direction,
            rules = overlap.rules.len(),
            "rule table lists the same edge more than once"
        );
    }

    let current = Identity {
        species_id: args.species_id,
        region: args.region,
    };
    let detail = snapshots.species_detail(args.species_id)?;
    let regional = match args.region {
        Some(region) => match snapshots.regional_detail(&detail.name.fr, region) {
            Ok(regional) => Some(regional),
            Err(e) => {
                tracing::warn!(%current, error = %e, "regional detail unavailable");
                None
            }
        },
        None => None,
    };
    let chain = snapshots.chain_for_species(args.species_id).unwrap_or_else(|e| {
        tracing::warn!(%current, error = %e, "evolution chain unavailable");
        None
    });

    let displayed = DisplayedDetail::merge(&detail, regional.as_ref());
    let resolver = Resolver::new(table).with_options(ResolverOptions { debug: args.debug });
    let panel = build_panel(
        &resolver,
        PanelInputs {
            current,
            entries: &entries,
            upstream: displayed.evolution.as_ref(),
            chain: chain.as_ref(),
        },
    );

    let regional_entry = entries.iter().find(|e| e.identity() == current && e.is_regional());
    print_detail(&displayed, &FormCycle::new(&detail), &detail, regional_entry);
    print_panel(&panel);
    print_neighbours(&entries, current);

    if args.debug {
        panel.events.print_debug_with_message("Resolution events:");
    }
    Ok(())
}

fn print_detail(
    displayed: &DisplayedDetail,
    forms: &FormCycle,
    detail: &pokedex_evolutions::SpeciesDetail,
    regional_entry: Option<&Entry>,
) {
    println!("{}", displayed.name.fr);
    if let Some(category) = &displayed.category {
        println!("  {}", category);
    }
    println!("  Types: {}", displayed.types.join(", "));
    println!("  Taille: {}  Poids: {}", displayed.height, displayed.weight);
    for (label, value) in displayed.stats.rows() {
        println!("  {:<8} {:>3}", label, value);
    }
    println!("  Sprite: {}", forms.sprite_url(detail, regional_entry));
    println!();
}

fn print_evolutions(title: &str, evolutions: &[ResolvedEvolution]) {
    println!("{}:", title);
    for evolution in evolutions {
        let marker = if evolution.is_synthesized() { " *" } else { "" };
        match &evolution.condition {
            Some(condition) => println!("  {}{} ({})", evolution.entry, marker, condition),
            None => println!("  {}{}", evolution.entry, marker),
        }
    }
}

fn print_panel(panel: &EvolutionPanel) {
    match panel.stage {
        Some(stage) => println!("Evolutions ({})", stage),
        None => println!("Evolutions"),
    }
    if panel.is_empty() {
        println!("  {}", NO_EVOLUTION_LABEL);
    }
    if panel.layout.shows_pre() {
        print_evolutions("Pré-évolutions", panel.visible_pre());
    }
    if panel.layout.shows_next() {
        print_evolutions("Évolutions", panel.visible_next());
    }
    println!();
}

fn print_neighbours(entries: &[Entry], current: Identity) {
    let filter = current.region.map_or(PokedexFilter::National, PokedexFilter::Regional);
    let list = filter.apply(entries);
    let around = neighbours(&list, current);
    let name = |entry: Option<&Entry>| entry.map(|e| e.to_string()).unwrap_or_else(|| "-".to_string());
    println!("{}: {} < > {}", filter.label(), name(around.previous), name(around.next));
}
