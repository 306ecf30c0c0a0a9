//! Single-page form. Vanilla JS against the JSON API, no build step.

use axum::response::{Html, IntoResponse};

use super::MIN_DESCRIPTION_CHARS;

const SECTORS: [&str; 7] = [
    "Automotive",
    "Healthcare",
    "Financial Services",
    "Education",
    "Law Enforcement",
    "Employment",
    "Other",
];

/// GET /
pub async fn index_page() -> impl IntoResponse {
    let sectors: String = SECTORS
        .iter()
        .map(|s| format!("<option value=\"{s}\">{s}</option>"))
        .collect();
    Html(
        PAGE.replace("__SECTOR_OPTIONS__", &sectors)
            .replace("__MIN_CHARS__", &MIN_DESCRIPTION_CHARS.to_string()),
    )
}

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>EU AI Act Risk Classifier</title>
    <style>
        body { font-family: system-ui, -apple-system, sans-serif; max-width: 960px; margin: 30px auto; padding: 0 20px; line-height: 1.5; color: #222; }
        h1 { border-bottom: 2px solid #1f4e99; padding-bottom: 8px; }
        .tabs button { padding: 8px 16px; border: 1px solid #ccc; background: #f4f4f4; cursor: pointer; border-radius: 4px 4px 0 0; }
        .tabs button.active { background: #1f4e99; color: #fff; border-color: #1f4e99; }
        .tab { display: none; border-top: 2px solid #1f4e99; padding-top: 16px; }
        .tab.active { display: block; }
        .row { display: flex; gap: 16px; }
        .row > div { flex: 1; }
        label { display: block; font-weight: 600; margin-top: 10px; }
        input[type=text], input[type=password], input[type=number], select, textarea { width: 100%; padding: 8px; box-sizing: border-box; }
        textarea { min-height: 140px; }
        button.primary { margin-top: 14px; width: 100%; padding: 12px; background: #1f4e99; color: #fff; border: 0; border-radius: 4px; font-size: 16px; cursor: pointer; }
        button.primary:disabled { background: #8aa3c9; }
        .msg { padding: 10px; border-radius: 4px; margin: 10px 0; }
        .msg.error { background: #fdecea; color: #8a1c12; }
        .msg.info { background: #e8f0fb; color: #1f4e99; }
        .risk-box { padding: 16px; border-radius: 6px; margin: 16px 0; border-left: 6px solid; }
        .risk-box.prohibited { background: #fdecea; border-color: #c62828; }
        .risk-box.high-risk { background: #fff4e5; border-color: #ef6c00; }
        .risk-box.transparency { background: #e8f0fb; border-color: #1565c0; }
        .risk-box.low-risk { background: #e8f5e9; border-color: #2e7d32; }
        .risk-box.exception { background: #f4f4f4; border-color: #757575; }
        .example { border: 1px solid #ddd; border-radius: 6px; padding: 12px; margin: 10px 0; }
        .notice { font-size: 13px; color: #555; border-top: 1px solid #ddd; margin-top: 30px; padding-top: 10px; }
        pre { white-space: pre-wrap; background: #f7f7f7; padding: 8px; }
        .hidden { display: none; }
    </style>
</head>
<body>
    <h1>🇪🇺 EU AI Act Risk Classifier</h1>
    <p>Describe an AI system and get a preliminary risk tier under Regulation (EU) 2024/1689.</p>

    <div class="tabs">
        <button data-tab="classify" class="active">🔍 Classify System</button>
        <button data-tab="examples">📚 Examples</button>
        <button data-tab="about">📖 About the EU AI Act</button>
        <button data-tab="settings">⚙️ Settings</button>
    </div>

    <section id="tab-classify" class="tab active">
        <form id="form">
            <div class="row">
                <div>
                    <label for="company">Company Name *</label>
                    <input type="text" id="company" placeholder="e.g., Mercedes-Benz">
                    <label for="name">AI System Name *</label>
                    <input type="text" id="name" placeholder="e.g., MBUX Virtual Assistant">
                </div>
                <div>
                    <label for="sector">Sector (Optional)</label>
                    <select id="sector">
                        <option value="">Auto-detect</option>
                        __SECTOR_OPTIONS__
                    </select>
                    <label><input type="checkbox" id="search"> Enable Web Search (Experimental)</label>
                </div>
            </div>
            <label for="description">System Description *</label>
            <textarea id="description" placeholder="Describe what the AI system does, who uses it, and in what context..."></textarea>
            <button type="submit" class="primary" id="submit">🚀 Classify System</button>
        </form>
        <div id="status"></div>
        <div id="correction" class="hidden">
            <p>The model output could not be used. Correct the record below and classify it directly, or resubmit the form.</p>
            <textarea id="raw"></textarea>
            <button class="primary" id="classify-corrected">Classify corrected record</button>
        </div>
        <div id="report"></div>
    </section>

    <section id="tab-examples" class="tab"><div id="examples"></div></section>

    <section id="tab-about" class="tab">
        <h2>Risk tiers</h2>
        <ul>
            <li><b>🚫 Prohibited</b> (Article 5): social scoring, manipulative techniques, exploitation of vulnerabilities, untargeted facial scraping, emotion recognition at work or school, real-time remote biometric identification in public spaces.</li>
            <li><b>⚠️ High-Risk</b> (Article 6, Annex I and III): safety components of regulated products, biometrics, critical infrastructure, education, employment, essential services and credit, law enforcement, migration, justice and elections.</li>
            <li><b>ℹ️ Transparency</b> (Article 50): systems interacting with people, generating synthetic content, emotion recognition or biometric categorisation, deep fakes.</li>
            <li><b>✅ Low-Risk</b>: everything else; voluntary codes of conduct (Article 95).</li>
            <li><b>➖ Exception</b> (Article 2): military, national security, research-only and personal non-professional use.</li>
        </ul>
        <h2>How the assessment works</h2>
        <ol>
            <li><b>Stage 1:</b> the model extracts a structured profile from your description.</li>
            <li><b>Optional:</b> a web search adds public context about the system.</li>
            <li><b>Stage 2:</b> the model applies the Act's decision tree to the profile.</li>
        </ol>
    </section>

    <section id="tab-settings" class="tab">
        <form id="settings-form">
            <div class="row">
                <div>
                    <label for="provider">Model provider</label>
                    <select id="provider">
                        <option>openai</option><option>anthropic</option><option>google</option>
                        <option>ollama</option><option>groq</option><option>mistral</option><option>deepseek</option>
                    </select>
                    <label for="model">Model</label>
                    <input type="text" id="model">
                    <label for="api-key">API key</label>
                    <input type="password" id="api-key" placeholder="leave empty to keep the current key">
                </div>
                <div>
                    <label for="search-provider">Search provider</label>
                    <select id="search-provider">
                        <option value="">disabled</option><option>duckduckgo</option><option>serper</option>
                    </select>
                    <label for="search-key">Search API key</label>
                    <input type="password" id="search-key" placeholder="leave empty to keep the current key">
                    <label for="timeout">Model timeout (seconds)</label>
                    <input type="number" id="timeout" min="1">
                </div>
            </div>
            <button type="submit" class="primary">Save settings</button>
        </form>
        <div id="settings-status"></div>
    </section>

    <p class="notice">⚖️ This tool provides <b>preliminary assessments only</b> and is not a substitute for legal advice.
    For compliance decisions, consult qualified legal professionals.</p>

<script>
const MIN_CHARS = __MIN_CHARS__;
const $ = (id) => document.getElementById(id);
let lastInput = null;

document.querySelectorAll('.tabs button').forEach((b) => b.addEventListener('click', () => {
    document.querySelectorAll('.tabs button').forEach((x) => x.classList.toggle('active', x === b));
    document.querySelectorAll('.tab').forEach((t) => t.classList.toggle('active', t.id === 'tab-' + b.dataset.tab));
}));

function el(tag, text, cls) {
    const e = document.createElement(tag);
    if (text !== undefined) e.textContent = text;
    if (cls) e.className = cls;
    return e;
}

function status(text, kind) {
    const s = $('status');
    s.replaceChildren();
    if (text) s.appendChild(el('div', text, 'msg ' + kind));
}

function list(tag, items) {
    const l = el(tag);
    items.forEach((i) => l.appendChild(el('li', i)));
    return l;
}

async function api(method, path, body) {
    const res = await fetch(path, {
        method,
        headers: { 'Content-Type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body),
    });
    if (!res.ok) {
        let err = { message: res.status + ' ' + res.statusText };
        try { err = (await res.json()).error || err; } catch (_) {}
        throw err;
    }
    return res;
}

const TIERS = {
    'prohibited': ['🚫', 'Prohibited'],
    'high-risk': ['⚠️', 'High-Risk'],
    'transparency': ['ℹ️', 'Additional Transparency Requirements'],
    'low-risk': ['✅', 'Low-Risk'],
    'exception': ['➖', 'Exception'],
};

function renderReport(report) {
    const c = report.classification;
    const p = report.profile;
    const out = $('report');
    out.replaceChildren();

    const box = el('div', undefined, 'risk-box ' + c.tier);
    const [icon, label] = TIERS[c.tier];
    box.appendChild(el('h2', icon + ' Classification: ' + label));
    box.appendChild(el('div', 'Confidence: ' + c.confidence));
    if (c.decision_branch) box.appendChild(el('div', 'Decision branch: ' + c.decision_branch));
    out.appendChild(box);
    out.appendChild(el('p', c.rationale));

    out.appendChild(el('h3', '📊 System Profile'));
    const rows = [
        ['Sector', p.sector], ['Purpose', p.primary_purpose], ['Deployment', p.deployment_context],
        ['User base', p.user_base], ['Autonomy', p.autonomy],
        ['Biometrics', p.biometrics_involved ? 'yes (' + (p.biometrics_purpose || 'purpose not stated') + ')' : 'no'],
        ['High-risk contexts', p.high_risk_contexts.join('; ') || 'none'],
        ['Data categories', p.data_categories.join('; ') || 'none'],
    ];
    out.appendChild(list('ul', rows.map(([k, v]) => k + ': ' + v)));

    if (c.reasoning.length) { out.appendChild(el('h3', '💡 Reasoning')); out.appendChild(list('ol', c.reasoning)); }
    out.appendChild(el('h3', '📜 Relevant EU AI Act Provisions'));
    out.appendChild(list('ul', c.relevant_provisions));
    out.appendChild(el('h3', '✅ Compliance Recommendations'));
    out.appendChild(list('ol', c.recommendations));
    if (report.sources.length) { out.appendChild(el('h3', '🌐 Sources')); out.appendChild(list('ul', report.sources)); }

    out.appendChild(el('h3', '💾 Export Results'));
    const row = el('div', undefined, 'row');
    [['📥 Download JSON', 'json'], ['📄 Download Report', 'text']].forEach(([text, kind]) => {
        const b = el('button', text, 'primary');
        b.addEventListener('click', () => download(kind, report));
        row.appendChild(el('div')).appendChild(b);
    });
    out.appendChild(row);
}

async function download(kind, report) {
    try {
        const res = await api('POST', '/api/export/' + kind, report);
        const cd = res.headers.get('Content-Disposition') || '';
        const m = cd.match(/filename="([^"]+)"/);
        const url = URL.createObjectURL(await res.blob());
        const a = el('a');
        a.href = url;
        a.download = m ? m[1] : 'report';
        a.click();
        URL.revokeObjectURL(url);
    } catch (e) {
        status('⚠️ Export failed: ' + e.message, 'error');
    }
}

function showFailure(e) {
    status('⚠️ ' + e.message + (e.retryable ? ' You can resubmit.' : ''), 'error');
    if (e.raw && e.code === 'HARVEST_FAILED') {
        $('raw').value = e.raw;
        $('correction').classList.remove('hidden');
    }
}

$('form').addEventListener('submit', async (ev) => {
    ev.preventDefault();
    $('report').replaceChildren();
    $('correction').classList.add('hidden');
    const input = {
        company: $('company').value.trim(),
        name: $('name').value.trim(),
        description: $('description').value.trim(),
        enableSearch: $('search').checked,
    };
    if ($('sector').value) input.sectorHint = $('sector').value;
    if (!input.company || !input.name || !input.description) {
        return status('⚠️ Please fill in all required fields (marked with *)', 'error');
    }
    if ([...input.description].length < MIN_CHARS) {
        return status('⚠️ Please provide a more detailed description (at least ' + MIN_CHARS + ' characters)', 'error');
    }
    lastInput = input;
    $('submit').disabled = true;
    status('🔍 Stage 1: harvesting information from the description, then Stage 2: applying the EU AI Act decision tree...', 'info');
    try {
        const report = await (await api('POST', '/api/assess', input)).json();
        status('✅ Classification complete', 'info');
        renderReport(report);
    } catch (e) {
        showFailure(e);
    } finally {
        $('submit').disabled = false;
    }
});

$('classify-corrected').addEventListener('click', async () => {
    let profile;
    try { profile = JSON.parse($('raw').value); } catch (e) { return status('⚠️ Not valid JSON: ' + e.message, 'error'); }
    status('🔍 Stage 2: applying the EU AI Act decision tree...', 'info');
    try {
        const classification = await (await api('POST', '/api/classify', profile)).json();
        $('correction').classList.add('hidden');
        status('✅ Classification complete', 'info');
        renderReport({ generatedAt: new Date().toISOString(), system: lastInput, profile, classification, sources: [] });
    } catch (e) {
        showFailure(e);
    }
});

async function loadExamples() {
    const examples = await (await api('GET', '/api/examples')).json();
    const box = $('examples');
    examples.forEach((ex) => {
        const d = el('div', undefined, 'example');
        d.appendChild(el('h3', ex.name + ' (' + ex.company + ')'));
        d.appendChild(el('p', ex.description));
        d.appendChild(el('p', 'Expected: ' + ex.expected));
        const b = el('button', 'Use this example');
        b.addEventListener('click', () => {
            $('company').value = ex.company;
            $('name').value = ex.name;
            $('description').value = ex.description;
            document.querySelector('.tabs button[data-tab=classify]').click();
        });
        d.appendChild(b);
        box.appendChild(d);
    });
}

async function loadSettings() {
    const s = await (await api('GET', '/api/settings')).json();
    $('provider').value = s.provider;
    $('model').value = s.model;
    $('search-provider').value = s.searchProvider;
    $('timeout').value = s.timeoutSecs;
    $('api-key').placeholder = s.hasKey ? 'key stored; leave empty to keep it' : 'no key stored';
    if (!s.configured) status('ℹ️ No model provider configured yet. Open the Settings tab.', 'info');
}

$('settings-form').addEventListener('submit', async (ev) => {
    ev.preventDefault();
    const box = $('settings-status');
    box.replaceChildren();
    try {
        await api('PUT', '/api/settings', {
            provider: $('provider').value,
            model: $('model').value,
            apiKey: $('api-key').value,
            searchProvider: $('search-provider').value,
            searchApiKey: $('search-key').value,
            timeoutSecs: Number($('timeout').value) || undefined,
        });
        $('api-key').value = '';
        $('search-key').value = '';
        box.appendChild(el('div', 'Settings saved', 'msg info'));
        await loadSettings();
    } catch (e) {
        box.appendChild(el('div', '⚠️ ' + e.message, 'msg error'));
    }
});

loadExamples();
loadSettings();
</script>
</body>
</html>
"#;
