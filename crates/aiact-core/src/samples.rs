use serde::Serialize;

/// A worked example shown on the "Examples" tab.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleCase {
    pub name: &'static str,
    pub company: &'static str,
    pub description: &'static str,
    pub expected: &'static str,
}

pub const EXAMPLES: &[ExampleCase] = &[
    ExampleCase {
        name: "MBUX Virtual Assistant",
        company: "Mercedes-Benz",
        description: "An AI-powered virtual assistant that enables natural conversations with drivers, \
providing personalized answers for navigation and points of interest while the vehicle is in operation.",
        expected: "Transparency (interactive AI), high-risk if it acts as a vehicle safety component",
    },
    ExampleCase {
        name: "AI Recruitment Tool",
        company: "HireTech Inc",
        description: "An AI system that screens job applications, ranks candidates based on resume analysis, \
and recommends top candidates to hiring managers for interview selection.",
        expected: "High-Risk (employment decisions, Annex III.4)",
    },
    ExampleCase {
        name: "Customer Service Chatbot",
        company: "ShopEasy",
        description: "A conversational AI chatbot that helps customers find products, track orders, and answer \
frequently asked questions on our e-commerce website.",
        expected: "Transparency (interactive AI, Article 50.1)",
    },
    ExampleCase {
        name: "Medical Diagnosis Assistant",
        company: "MedAI Solutions",
        description: "An AI system that analyzes patient symptoms, medical history, and test results to suggest \
potential diagnoses and treatment options for physicians to review.",
        expected: "High-Risk (medical device software, Article 6.1)",
    },
    ExampleCase {
        name: "Citizen Trust Score",
        company: "Municipal Services Agency",
        description: "Social scoring system run by a public authority to rank citizen trustworthiness based on \
their behaviour, used to prioritise access to public services.",
        expected: "Prohibited (social scoring, Article 5.1c)",
    },
    ExampleCase {
        name: "Pantry Chef",
        company: "HomeCook Labs",
        description: "A chatbot that recommends recipes based on pantry items the user lists, with no account \
and no personal data retained.",
        expected: "Low-Risk (recommendation tool; no biometric, safety-critical, employment or credit context)",
    },
];
