//! Fallback plan generator: deterministic, input-derived plans for when the AI is unusable.
//!
//! Pure: the same request and AI text always produce the same `PartialPlan`. The output is
//! fed through the normalizer like any AI response.

use tracing::debug;

use crate::models::plan::RequestProfile;
use crate::planning::partial::{PartialPlan, PartialStage};

/// Characters of AI text kept as the motivational note.
pub const MOTIVATION_NOTE_LIMIT: usize = 200;

const MIN_STAGES: u32 = 2;
const MAX_STAGES: u32 = 3;
const MIN_WEEKS_PER_STAGE: u32 = 4;

/// A keyword group and the resources suggested when the career goal mentions it.
#[derive(Debug)]
pub struct ResourceTrack {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub resources: [&'static str; 4],
}

/// Checked in order; first match wins.
pub const RESOURCE_TRACKS: &[ResourceTrack] = &[
    ResourceTrack {
        name: "microservices",
        keywords: &["microservices", "microserviços", "microsserviços"],
        resources: [
            "Course: Spring Cloud and Microservices (Udemy/Coursera)",
            "Documentation: Spring Cloud Gateway, Eureka, Config Server",
            "Hands-on project: e-commerce system built with microservices",
            "Book: 'Building Microservices' - Sam Newman",
        ],
    },
    ResourceTrack {
        name: "java",
        keywords: &["java"],
        resources: [
            "Course: Complete Java (Nélio Alves - Udemy)",
            "Official documentation: Oracle Java Documentation",
            "Hands-on project: REST API with Spring Boot",
            "Book: 'Effective Java' - Joshua Bloch",
        ],
    },
    ResourceTrack {
        name: "python",
        keywords: &["python", "django", "fastapi"],
        resources: [
            "Course: Python for Everybody (Coursera)",
            "Official documentation: docs.python.org",
            "Hands-on project: REST API with FastAPI and PostgreSQL",
            "Book: 'Fluent Python' - Luciano Ramalho",
        ],
    },
    ResourceTrack {
        name: "data",
        keywords: &["data science", "ciência de dados", "machine learning", "dados"],
        resources: [
            "Course: Machine Learning Specialization (Coursera)",
            "Documentation: pandas and scikit-learn user guides",
            "Hands-on project: end-to-end analysis of a public dataset on Kaggle",
            "Book: 'Hands-On Machine Learning' - Aurélien Géron",
        ],
    },
];

pub const GENERIC_RESOURCES: [&str; 4] = [
    "Specialized online courses in the field",
    "Official documentation of the technologies",
    "Hands-on projects for your portfolio",
    "Developer communities (Stack Overflow, Reddit)",
];

pub const ADDITIONAL_RESOURCES: [&str; 4] = [
    "Online communities (Stack Overflow, Reddit)",
    "Discussion forums",
    "Professional certifications",
    "Networking with professionals in the field",
];

pub const SUCCESS_METRICS: [&str; 4] = [
    "Completion of hands-on projects",
    "Applying knowledge in real situations",
    "Active participation in communities",
    "Portfolio growth",
];

/// The first track whose keywords appear in the goal (case-insensitive).
pub fn track_for_goal(career_goal: &str) -> Option<&'static ResourceTrack> {
    let goal = career_goal.to_lowercase();
    RESOURCE_TRACKS
        .iter()
        .find(|track| track.keywords.iter().any(|k| goal.contains(k)))
}

/// Resources of the matching track, or the generic list.
pub fn resources_for_goal(career_goal: &str) -> &'static [&'static str; 4] {
    track_for_goal(career_goal)
        .map(|track| &track.resources)
        .unwrap_or(&GENERIC_RESOURCES)
}

/// 2 stages up to 5 months, 3 from 6 months on.
pub fn stage_count(effective_months: u32) -> u32 {
    (effective_months / 2).clamp(MIN_STAGES, MAX_STAGES)
}

pub fn weeks_per_stage(effective_months: u32, stage_count: u32) -> u32 {
    (effective_months.saturating_mul(4) / stage_count.max(1)).max(MIN_WEEKS_PER_STAGE)
}

/// Builds the complete synthetic plan.
pub fn generate(request: &RequestProfile, ai_text: &str) -> PartialPlan {
    let months = request.effective_months();
    let count = stage_count(months);
    let weeks = weeks_per_stage(months, count);
    let resources = resources_for_goal(&request.career_goal);
    debug!(
        "Fallback plan: {count} stages of {weeks} weeks, {} resources",
        track_for_goal(&request.career_goal).map_or("generic", |t| t.name)
    );

    let stages = (1..=count)
        .map(|position| build_stage(position, weeks, request, resources))
        .collect();

    PartialPlan {
        stages,
        ..plan_fields(request, ai_text)
    }
}

/// Everything but the stages: scalars, fixed lists and the motivational note.
pub fn plan_fields(request: &RequestProfile, ai_text: &str) -> PartialPlan {
    let months = request.effective_months();
    let total_hours = request.estimated_hours_saturating();

    PartialPlan {
        career_goal: Some(request.career_goal.clone()),
        current_level: Some(request.current_level.clone()),
        total_months: Some(i64::from(months)),
        total_estimated_hours: Some(i64::try_from(total_hours).unwrap_or(i64::MAX)),
        stages: Vec::new(),
        additional_resources: Some(to_strings(&ADDITIONAL_RESOURCES)),
        success_metrics: Some(to_strings(&SUCCESS_METRICS)),
        motivation: Some(motivation(request, ai_text, total_hours)),
    }
}

fn motivation(request: &RequestProfile, ai_text: &str, total_hours: u64) -> String {
    if !ai_text.trim().is_empty() {
        return ai_text.chars().take(MOTIVATION_NOTE_LIMIT).collect();
    }
    format!(
        "You are on the right track to reach your goal of {}! Dedicating {} hours per week, \
        you will have {} hours of learning. Every completed stage is an important step in your \
        professional journey. Stay focused and practice constantly!",
        request.career_goal, request.hours_per_week, total_hours
    )
}

fn build_stage(
    position: u32,
    weeks: u32,
    request: &RequestProfile,
    resources: &[&'static str; 4],
) -> PartialStage {
    let skills = &request.current_skills;

    let (title, description, developed, suggested) = match position {
        1 => {
            let base = if skills.len() >= 2 { &skills[..2] } else { &skills[..] };
            let focus = if base.is_empty() {
                request.career_goal.clone()
            } else {
                base.join(", ")
            };
            (
                "Foundations",
                format!(
                    "Build a solid foundation in {focus}. Focus on understanding the core \
                    concepts and essential practices."
                ),
                base.to_vec(),
                &resources[..2],
            )
        }
        2 => (
            "Deepening & Practice",
            format!(
                "Deepen your knowledge and apply it in hands-on projects related to {}. \
                Build real projects to consolidate what you learned.",
                request.career_goal
            ),
            if skills.len() >= 3 {
                skills[1..3].to_vec()
            } else {
                skills.clone()
            },
            &resources[2..],
        ),
        _ => (
            "Specialization & Advanced Projects",
            format!(
                "Develop advanced projects and specialize in {}. Build complex solutions and \
                publish your portfolio.",
                request.career_goal
            ),
            if skills.len() >= 2 {
                skills[skills.len() - 2..].to_vec()
            } else {
                skills.clone()
            },
            &resources[..],
        ),
    };

    PartialStage {
        order: Some(i64::from(position)),
        title: Some(title.to_string()),
        description: Some(description),
        duration_weeks: Some(i64::from(weeks)),
        suggested_resources: Some(to_strings(suggested)),
        developed_skills: Some(developed),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
