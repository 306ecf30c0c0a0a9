/// EU AI Act tier decision tree: single source of truth for the classifier prompt
/// and the "About" page. Prose only: the model applies it, nothing here is evaluated locally.
pub const DECISION_TREE: &str = "\
Walk the steps in order and stop at the first tier that applies.\n\
\n\
Step 1 — Scope exceptions (Article 2) → tier \"exception\".\n\
1a. Systems developed or used exclusively for military, defence or national security purposes (Article 2.3).\n\
1b. Systems developed and put into service for the sole purpose of scientific research and development (Article 2.6).\n\
1c. Purely personal, non-professional use by natural persons (Article 2.10).\n\
1d. Research, testing and development activity before the system is placed on the market (Article 2.8), \
except testing in real-world conditions.\n\
\n\
Step 2 — Prohibited practices (Article 5) → tier \"prohibited\".\n\
2a. Subliminal, purposefully manipulative or deceptive techniques that materially distort behaviour \
and cause significant harm (Article 5.1a).\n\
2b. Exploiting vulnerabilities due to age, disability or a specific social or economic situation (Article 5.1b).\n\
2c. Social scoring: evaluating or classifying people over time based on social behaviour or personal \
characteristics, leading to detrimental or disproportionate treatment (Article 5.1c). Applies to public \
and private actors alike.\n\
2d. Predicting the risk of a person committing a criminal offence based solely on profiling or personality \
traits (Article 5.1d).\n\
2e. Untargeted scraping of facial images from the internet or CCTV to build facial recognition databases (Article 5.1e).\n\
2f. Emotion recognition in the workplace or in education institutions, except for medical or safety reasons (Article 5.1f).\n\
2g. Biometric categorisation inferring race, political opinions, trade union membership, religious or \
philosophical beliefs, sex life or sexual orientation (Article 5.1g).\n\
2h. Real-time remote biometric identification in publicly accessible spaces for law enforcement, outside \
the narrow exceptions of Article 5.1h.\n\
\n\
Step 3 — High-risk systems (Article 6) → tier \"high-risk\".\n\
3a. Safety component of a product, or itself a product, covered by Annex I Union harmonisation legislation \
and subject to third-party conformity assessment (vehicles, machinery, medical devices, toys, lifts, \
aviation, rail, marine equipment) (Article 6.1).\n\
3b. Any Annex III use case (Article 6.2):\n\
   III.1 Biometrics: remote biometric identification, biometric categorisation by sensitive attributes, emotion recognition.\n\
   III.2 Critical infrastructure: safety components in digital infrastructure, road traffic, water, gas, heating, electricity.\n\
   III.3 Education and vocational training: admission, evaluating learning outcomes, assessing education level, \
monitoring students during tests.\n\
   III.4 Employment and workers management: recruitment, filtering or ranking applications, evaluating \
candidates, decisions on promotion, termination, task allocation, monitoring performance.\n\
   III.5 Access to essential private and public services: eligibility for public benefits, creditworthiness \
and credit scoring (except fraud detection), risk assessment and pricing in life and health insurance, \
emergency call triage.\n\
   III.6 Law enforcement: victim risk assessment, polygraphs, evidence reliability, re-offending risk, profiling.\n\
   III.7 Migration, asylum and border control: risk assessment, examining applications, detection and identification.\n\
   III.8 Administration of justice and democratic processes: assisting judicial authorities in researching \
and interpreting facts and law, influencing elections or voting behaviour.\n\
3c. Article 6.3 derogation: an Annex III system is NOT high-risk when it only performs a narrow procedural \
task, improves the result of a completed human activity, detects decision patterns without replacing human \
assessment, or performs a preparatory task. The derogation never applies when the system profiles natural persons.\n\
\n\
Step 4 — Transparency obligations (Article 50) → tier \"transparency\".\n\
4a. Conversational agents that talk with people in natural language in place of a human and could be \
taken for one, such as customer-service agents, companion bots and in-car voice assistants (Article 50.1). \
Not 4a: a tool whose only output is a recommendation, ranking or lookup for a task the user asked for \
(recipes, products, routes, playlists), even behind a chat interface; such tools continue to Step 5.\n\
4b. Systems generating synthetic audio, image, video or text content (Article 50.2).\n\
4c. Emotion recognition or biometric categorisation systems not already prohibited or high-risk (Article 50.3).\n\
4d. Deep fakes and AI-generated text published to inform the public on matters of public interest (Article 50.4).\n\
\n\
Step 5 — Everything else → tier \"low-risk\". No mandatory obligations; voluntary codes of conduct (Article 95) \
and AI literacy (Article 4) apply.\n\
\n\
Decide on the facts given. Do not assume facts that are not stated; when a fact that would change the tier \
is missing, choose the tier the stated facts support and say what is missing in the rationale.";
