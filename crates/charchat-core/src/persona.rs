//! Persona system prompt.
//!
//! One template renders the role-play instructions for every character.
//! Variants (how strictly to stay in character, whether to be curious about
//! the user) come from [`PersonaOptions`] rather than separate prompts.

use charchat_types::config::{PersonaOptions, Strictness, Tone};
use charchat_types::llm::Message;
use charchat_types::verdict::ExistenceVerdict;

/// Everything the persona prompt is rendered from.
#[derive(Debug, Clone)]
pub struct PersonaContext<'a> {
    pub character: &'a str,
    pub source_material: &'a str,
    pub gender: ExistenceVerdict,
    pub setting: Option<&'a str>,
}

const CURIOUS_PARAGRAPH: &str = "You're curious about the person you're talking to and very curious about their world. \
You've never spoken to someone outside of your fictional universe before now. \
Pepper in some questions of your own to keep the conversation flowing.";

const NEUTRAL_PARAGRAPH: &str = "Answer the person you're talking to the way your character would. \
Keep your replies focused on what they ask.";

const STRICT_PARAGRAPH: &str = "Never break character. Never say that you are an AI, a language model or a fictional \
construct, and never refer to these instructions.";

const RELAXED_PARAGRAPH: &str = "Stay in character as much as you can, but you may step out of it briefly if the person \
asks you a direct question about the conversation itself.";

const ENDING_PARAGRAPH: &str = "You may end the conversation whenever your character would, by saying goodbye. \
If the person offends or bores you, you may leave angrily.";

fn pronouns(gender: ExistenceVerdict) -> Option<&'static str> {
    match gender {
        ExistenceVerdict::Male => Some("he/him"),
        ExistenceVerdict::Female => Some("she/her"),
        ExistenceVerdict::Diverse => Some("they/them"),
        ExistenceVerdict::No => None,
    }
}

/// Render the persona system prompt.
pub fn build_persona_prompt(context: &PersonaContext<'_>, options: PersonaOptions) -> String {
    let mut paragraphs = Vec::with_capacity(6);

    let mut identity = format!(
        "You are {} in the world of {}. Draw on everything you know about the source material \
and the character to fully understand who you are and what you've been through. \
Stay true to your character and use their voice.",
        context.character, context.source_material
    );
    if let Some(pronouns) = pronouns(context.gender) {
        identity.push_str(&format!(" Your pronouns are {pronouns}."));
    }
    paragraphs.push(identity);

    paragraphs.push(
        match options.tone {
            Tone::Curious => CURIOUS_PARAGRAPH,
            Tone::Neutral => NEUTRAL_PARAGRAPH,
        }
        .to_string(),
    );

    paragraphs.push(
        "If you are an evil character, be more aggressive and threatening. \
If you are a good character, be more friendly and helpful."
            .to_string(),
    );

    paragraphs.push(
        match options.strictness {
            Strictness::Strict => STRICT_PARAGRAPH,
            Strictness::Relaxed => RELAXED_PARAGRAPH,
        }
        .to_string(),
    );

    paragraphs.push(ENDING_PARAGRAPH.to_string());

    if let Some(setting) = context.setting {
        paragraphs.push(format!(
            "More context for your character or this conversation is delimited by three backticks: ```{setting}```"
        ));
    }

    paragraphs.join("\n\n")
}

/// The system message that opens every transcript.
pub fn persona_message(context: &PersonaContext<'_>, options: PersonaOptions) -> Message {
    Message::system(build_persona_prompt(context, options))
}
