use crate::types::{Profile, Project, Role, SessionLine, SkillGroup};

pub const PROFILE: Profile = Profile {
    brand: "AF",
    greeting: "Hi, my name is",
    name: "Bhavika Salunkhe.",
    headline: "Full Stack Developer & AI Enthusiast",
    summary: "I am a software engineer studying AI and Data Science.",
    email: "",
    github: "https://github.com/bhavikasalunkhe26",
    linkedin: "https://www.linkedin.com/in/bhavika-salunkhe/",
};

pub const SESSION: [SessionLine; 3] = [
    SessionLine {
        input: "whoami",
        output: "Bhavika Salunkhe",
    },
    SessionLine {
        input: "cat skills.txt",
        output: "Full Stack Development | AI & Data Science | Problem Solving",
    },
    SessionLine {
        input: "git status",
        output: "Currently working on: AI-powered projects and web applications",
    },
];

pub const ROLES: [Role; 2] = [
    Role {
        title: "Intern",
        company: "Yhills",
        period: "2022 - 2023",
        points: &[
            "Collaborated on various web Development projects",
            "Worked on programming languages like Java and C++",
        ],
    },
    Role {
        title: "Intern",
        company: "Sumago Infotech",
        period: "2020 - 2021",
        points: &[
            "Completed projects using HTML, CSS, and JavaScript",
            "Empowered myself to acquire new skills",
        ],
    },
];

pub const PROJECTS: [Project; 4] = [
    Project {
        title: "Secure Data in Images",
        description: "Hide important text and files within images using AES algorithm",
        tech: &["Python", "Crypto Library", "StreamLit"],
        github: "",
        live: "",
    },
    Project {
        title: "CodeExplainer",
        description: "AI-powered code explanation tool using Gemini API",
        tech: &["TypeScript", "Next.js", "Gemini AI API"],
        github: "",
        live: "",
    },
    Project {
        title: "CodeTestForge",
        description: "Automated Python test case generator with code quality analysis",
        tech: &["Flask", "Python", "JavaScript"],
        github: "",
        live: "#",
    },
    Project {
        title: "Collaborative Whiteboard Application",
        description: "A real-time collaborative whiteboard application where multiple users can draw, sketch, and collaborate simultaneously.",
        tech: &["React", "Express", "Keycloak", "Bootstrap"],
        github: "",
        live: "#",
    },
];

pub const SKILLS: [SkillGroup; 4] = [
    SkillGroup {
        category: "Languages",
        items: &["C++", "Python", "JavaScript", "Java", "Rust"],
    },
    SkillGroup {
        category: "Frameworks",
        items: &["React", "Next.js", "Node.js", "Flask", "PyTorch"],
    },
    SkillGroup {
        category: "Tools",
        items: &["Git", "Github", "Docker"],
    },
    SkillGroup {
        category: "Databases",
        items: &["MongoDB", "Postgres"],
    },
];
