use super::link::{Category, Link};

/// Categories a fresh dashboard starts with
pub fn seed_categories() -> Vec<Category> {
    [
        ("dev", "开发"),
        ("design", "设计"),
        ("news", "资讯"),
        ("ai", "AI 工具"),
        ("social", "社交"),
    ]
    .into_iter()
    .map(|(id, name)| Category {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

/// Links a fresh dashboard starts with
pub fn seed_links() -> Vec<Link> {
    [
        ("1", "GitHub", "https://github.com", "全球最大的软件构建与协作平台。", "dev", "🐙", 120),
        ("2", "Stack Overflow", "https://stackoverflow.com", "开发人员的专业问答社区。", "dev", "🥞", 85),
        ("3", "Figma", "https://figma.com", "协作式界面设计工具。", "design", "🎨", 95),
        ("4", "Dribbble", "https://dribbble.com", "发现全球顶尖设计师的创意作品。", "design", "🏀", 40),
        ("5", "Hacker News", "https://news.ycombinator.com", "计算机科学新闻与讨论。", "news", "Y", 200),
        ("6", "ChatGPT", "https://chat.openai.com", "OpenAI 开发的 AI 聊天助手。", "ai", "🤖", 350),
        ("7", "Google Gemini", "https://gemini.google.com", "激发您的创造力与生产力。", "ai", "✨", 300),
    ]
    .into_iter()
    .map(|(id, title, url, description, category, icon, visits)| Link {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        icon: Some(icon.to_string()),
        category: category.to_string(),
        visits,
    })
    .collect()
}
