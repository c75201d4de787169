use log::{debug, info, warn};

use contest_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::contest::config_reader::*;

#[derive(Debug, Snafu)]
pub enum ContestFileError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON from {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing JSON"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid contest: {source}"))]
    Engine { source: ContestErrors },
    #[snafu(display("Difference detected between the computed summary and the reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TallyResult<T> = Result<T, ContestFileError>;

pub mod config_reader {
    use crate::contest::*;

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct StateEntry {
        pub id: u32,
        pub name: String,
        pub song: String,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct JudgeEntry {
        pub id: u32,
        pub name: String,
        pub results: Vec<u32>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct VoteEntry {
        pub from: u32,
        pub to: u32,
        pub count: Option<u64>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct ContestConfig {
        #[serde(rename = "contestName")]
        pub contest_name: String,
        #[serde(rename = "audiencePercent")]
        pub audience_percent: Option<u32>,
        pub states: Vec<StateEntry>,
        #[serde(default)]
        pub judges: Vec<JudgeEntry>,
        #[serde(default)]
        pub votes: Vec<VoteEntry>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct OutputConfig {
        pub contest: String,
        #[serde(rename = "audiencePercent")]
        pub audience_percent: u32,
    }

    pub fn read_contest(path: &str) -> TallyResult<ContestConfig> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
        let config: ContestConfig =
            serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
        debug!("read_contest: {:?}", config);
        Ok(config)
    }

    pub fn read_summary(path: &str) -> TallyResult<JSValue> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
        debug!("read content: {:?}", contents);
        let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
        Ok(js)
    }
}

/// Registers the states, the judges and the votes of the configuration.
pub fn build_contest(config: &ContestConfig) -> TallyResult<Contest> {
    if config.states.is_empty() {
        whatever!("Contest {:?} has no states", config.contest_name)
    }
    let mut contest = Contest::new();
    for s in config.states.iter() {
        contest
            .add_state(StateId(s.id), &s.name, &s.song)
            .context(EngineSnafu {})?;
    }
    for j in config.judges.iter() {
        let results: Vec<StateId> = j.results.iter().map(|sid| StateId(*sid)).collect();
        contest
            .add_judge(JudgeId(j.id), &j.name, &results)
            .context(EngineSnafu {})?;
    }
    for v in config.votes.iter() {
        let count = v.count.unwrap_or(1);
        if count == 0 {
            warn!("build_contest: skipping empty vote from {} to {}", v.from, v.to);
            continue;
        }
        contest
            .add_votes(StateId(v.from), StateId(v.to), count)
            .context(EngineSnafu {})?;
    }
    info!(
        "build_contest: {} states, {} judges, {} vote entries",
        config.states.len(),
        config.judges.len(),
        config.votes.len()
    );
    Ok(contest)
}

fn rules_for(config: &ContestConfig, audience_percent: Option<u32>) -> TallyResult<ContestRules> {
    let rules = ContestRules {
        audience_percent: audience_percent
            .or(config.audience_percent)
            .unwrap_or(ContestRules::DEFAULT_RULES.audience_percent),
    };
    rules.validate().context(EngineSnafu {})?;
    Ok(rules)
}

fn state_name(contest: &Contest, sid: StateId) -> TallyResult<String> {
    let s = contest.state(sid).context(EngineSnafu {})?;
    Ok(s.name().to_string())
}

fn build_summary_js(
    config: &ContestConfig,
    contest: &Contest,
    result: &contest_ranking::ContestResult,
    audience_favorite: &contest_ranking::ContestResult,
    friendly: &[(StateId, StateId)],
) -> TallyResult<JSValue> {
    let c = OutputConfig {
        contest: config.contest_name.clone(),
        audience_percent: result.audience_percent,
    };
    let results: Vec<JSValue> = result
        .standings
        .iter()
        .map(|st| json!({"state": st.state.0, "name": st.name, "score": format!("{:.3}", st.score)}))
        .collect();
    let mut friendly_js: Vec<JSValue> = Vec::new();
    for (a, b) in friendly.iter() {
        friendly_js.push(json!([state_name(contest, *a)?, state_name(contest, *b)?]));
    }
    Ok(json!({
        "config": c,
        "results": results,
        "audienceFavorite": audience_favorite.ranked_names(),
        "friendlyStates": friendly_js,
    }))
}

/// Runs the contest described by the configuration and returns its summary.
pub fn tabulate(config: &ContestConfig, audience_percent: Option<u32>) -> TallyResult<JSValue> {
    let rules = rules_for(config, audience_percent)?;
    let mut contest = build_contest(config)?;

    // The audience-only ranking runs on a copy so that the recorded scores stay the final ones.
    let mut audience_contest = contest.try_clone().context(EngineSnafu {})?;
    let audience_favorite = audience_contest
        .run_audience_favorite()
        .context(EngineSnafu {})?;

    let result = contest.run_contest(&rules).context(EngineSnafu {})?;
    let friendly = contest.friendly_states();
    info!("friendly states: {:?}", friendly);

    build_summary_js(config, &contest, &result, &audience_favorite, &friendly)
}

pub fn run_contest_file(
    input_path: &str,
    out: Option<&str>,
    reference_path: Option<&str>,
    audience_percent: Option<u32>,
) -> TallyResult<()> {
    let config = read_contest(input_path)?;
    info!("Running contest {:?} from {:?}", config.contest_name, input_path);

    let summary_js = tabulate(&config, audience_percent)?;
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(WritingJsonSnafu {})?;

    match out {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(WritingSummarySnafu { path })?;
            info!("Summary written to {:?}", path);
        }
        None => debug!("summary: {}", pretty_js_stats),
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = reference_path {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu { path: summary_p }.fail();
        }
    }

    Ok(())
}
