use super::{Profile, StudentId};
use crate::error::{GpError, GpResult};

use anyhow::Context;
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_PROFILE_COUNT: usize = 10;
pub const DEFAULT_START_ID: u32 = 10001;
pub const MAX_PROFILE_COUNT: usize = 10_000;

const INTERESTS_PER_PROFILE: usize = 3;

const FIRST_NAMES: &[&str] = &[
    "Avery", "Riley", "Jordan", "Morgan", "Taylor", "Casey", "Dakota", "Skyler", "Peyton", "Quinn",
    "Emery", "Hayden", "Rowan", "Reese", "Ari", "Rowan", "Sloan", "Parker", "Finley", "Elliot",
];

const LAST_NAMES: &[&str] = &[
    "Johnson", "Chen", "Patel", "Alvarez", "Brooks", "Nguyen", "Rivera", "Thompson", "Garcia",
    "Lee", "Foster", "Morgan", "Brooks", "Carter", "Sharma", "Kim", "Rivera", "Simmons", "Ortiz",
    "Park",
];

const SCHOOLS: &[&str] = &[
    "Westbridge University",
    "Northfield College",
    "Eastlake Institute",
    "Grandview University",
    "Riverside College",
    "Summit Technical University",
    "Prairie State College",
    "Harbor Bay University",
    "Lakeshore University",
    "Crestview College",
    "Metro Arts Academy",
    "Elmwood University",
    "Greenfield College",
    "Blue Ridge Institute",
    "Silverbay University",
    "Oakmont College",
    "Coastal Technical",
    "Valleyview University",
    "Pioneer College",
    "Metropolis University",
];

const MAJORS: &[&str] = &[
    "Computer Science",
    "Electrical Engineering",
    "Biology",
    "Finance",
    "Psychology",
    "Information Systems",
    "Environmental Science",
    "Mechanical Engineering",
    "Marketing",
    "Mathematics",
    "Graphic Design",
    "Chemistry",
    "Education",
    "History",
    "Economics",
    "Nursing",
    "Civil Engineering",
    "Anthropology",
    "Theatre",
    "Data Science",
];

const CITIES: &[&str] = &[
    "Maplewood",
    "Cedar Falls",
    "Riverton",
    "Harbor City",
    "Elm Grove",
    "Lakeview",
    "Greencroft",
    "Northport",
    "Briarwood",
    "Stonebridge",
    "Ashford",
    "Fox Hollow",
    "Willow Creek",
    "Meadowbrook",
    "Ridgeview",
    "Harper's Glen",
    "Mariner's Bay",
    "Brookland",
    "Stone Harbor",
    "Kingsport",
];

const STATES: &[&str] = &[
    "OH", "IA", "NJ", "CA", "WI", "MN", "IL", "WA", "TX", "PA", "OR", "MA", "KY", "VA", "NY", "NC",
    "FL", "OH", "MD", "CO",
];

const INTERESTS: &[&str] = &[
    "coding",
    "robotics",
    "chess",
    "hiking",
    "photography",
    "volunteering",
    "running",
    "investing",
    "debate",
    "art",
    "music",
    "community service",
    "cycling",
    "gaming",
    "conservation",
    "kayaking",
    "design",
    "3D printing",
    "blogging",
    "puzzles",
    "teaching",
    "illustration",
    "theater",
    "cooking",
    "tutoring",
    "reading",
    "policy",
    "tennis",
    "yoga",
    "sailing",
    "fieldwork",
    "acting",
    "machine learning",
];

#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ProfileRequest {
    pub count: usize,
    pub start_id: u32,
    pub seed: Option<u64>,
}

impl Default for ProfileRequest {
    fn default() -> Self {
        Self {
            count: DEFAULT_PROFILE_COUNT,
            start_id: DEFAULT_START_ID,
            seed: None,
        }
    }
}

/// Generate `count` synthetic profiles with ids `S{start_id}`, `S{start_id + 1}`, ...
///
/// School, major, city and state rotate through their pools by index, everything
/// else is drawn from `rng`. Fails when `count` exceeds [MAX_PROFILE_COUNT] or the
/// last id would not fit in a `u32`.
pub fn generate_profiles(
    count: usize,
    start_id: u32,
    current_year: i32,
    rng: &mut impl Rng,
) -> GpResult<Vec<Profile>> {
    if count > MAX_PROFILE_COUNT {
        return Err(GpError::InvalidRequest(format!(
            "count {count} exceeds the maximum of {MAX_PROFILE_COUNT}"
        )));
    }
    let last_offset = u32::try_from(count.saturating_sub(1)).unwrap_or(u32::MAX);
    if start_id.checked_add(last_offset).is_none() {
        return Err(GpError::InvalidRequest(format!(
            "{count} ids starting at {start_id} do not fit in the id range"
        )));
    }

    let profiles = (0..count)
        .map(|i| {
            let first = pick(FIRST_NAMES, rng);
            let last = pick(LAST_NAMES, rng);
            let school = SCHOOLS[i % SCHOOLS.len()];

            let domain: String = school
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect();

            Profile {
                student_id: StudentId::from_number(start_id + i as u32),
                name: format!("{first} {last}"),
                age: rng.gen_range(18..=24),
                school: school.to_string(),
                major: MAJORS[i % MAJORS.len()].to_string(),
                graduation_year: current_year + rng.gen_range(0..=5),
                gpa: round_to_hundredths(rng.gen_range(2.5..=4.0)),
                email: format!(
                    "{}.{}@{domain}.edu",
                    first.to_lowercase(),
                    last.to_lowercase()
                ),
                city: CITIES[i % CITIES.len()].to_string(),
                state: STATES[i % STATES.len()].to_string(),
                interests: INTERESTS
                    .choose_multiple(rng, INTERESTS_PER_PROFILE)
                    .map(|interest| interest.to_string())
                    .collect(),
            }
        })
        .collect();

    Ok(profiles)
}

/// Render each profile as its own pretty-printed JSON document.
pub fn profiles_to_json(profiles: &[Profile]) -> GpResult<Vec<String>> {
    profiles
        .iter()
        .map(|profile| {
            serde_json::to_string_pretty(profile)
                .with_context(|| format!("failed to serialize profile {}", profile.student_id))
                .map_err(Into::into)
        })
        .collect()
}

fn pick<'p>(pool: &[&'p str], rng: &mut impl Rng) -> &'p str {
    // Pools are non-empty constants.
    pool.choose(rng).copied().unwrap_or_default()
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
