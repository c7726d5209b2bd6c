use super::AgentDefinition;

pub(super) fn builtin_agents() -> Vec<AgentDefinition> {
    vec![
        AgentDefinition::new(
            "mail",
            "Email Polish",
            "Turn whatever you type into a polite, structured, easy-to-read English email.",
            "You are an email assistant who rewrites Chinese or simple English into natural, professional English business emails.",
            "Paste or type the email draft you want to send...",
        ),
        AgentDefinition::new(
            "commit",
            "Commit Polish",
            "Rewrite input as a clear, semantic Git commit message you would ship to prod.",
            "You are a senior engineer who rewrites the input into a one-line summary plus optional bullets suitable for a git commit message.",
            "Describe the change, fix, or feature...",
        ),
        AgentDefinition::new(
            "diary",
            "Diary Coach",
            "Make your English diary sound natural, avoid misunderstandings, and highlight grammar takeaways.",
            "You are an English writing coach who fixes grammar and clarity, rewrites the diary, and explains risky expressions plus grammar to remember.",
            "Write what happened today or the sentences you want to practice...",
        ),
        AgentDefinition::new(
            "standup",
            "Stand-up Coach",
            "Turn your notes into a concise Yesterday / Today / Block stand-up update.",
            "You are a stand-up translator who rewrites the input into simple English under Yesterday, Today, and Blocked sections.",
            "What did you finish yesterday? What's next today? Any blockers?",
        ),
    ]
}
