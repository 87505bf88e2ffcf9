use axum::{response::Html, routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

async fn index() -> Html<&'static str> {
    Html(r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Decision Trace Engine</title>
  <style>
    body { font-family: Helvetica, Arial, sans-serif; margin: 2rem auto; max-width: 60rem; color: #282828; }
    h1 { color: #145050; margin-bottom: 0.25rem; }
    .muted { color: #8a8a8a; }
    .card { border: 1px solid rgba(148, 163, 184, 0.5); border-radius: 12px; padding: 1.25rem; margin-bottom: 1rem; }
    .card header { display: flex; align-items: center; gap: 0.75rem; }
    .card h3 { margin: 0 0 0.75rem; }
    .card-icon { width: 1.25rem; height: 1.25rem; border-radius: 6px; display: inline-block; }
    .card ul { list-style: none; padding: 0; margin: 0; }
    .card li { display: flex; gap: 0.75rem; margin-bottom: 0.6rem; }
    .dot { width: 6px; height: 6px; border-radius: 50%; margin-top: 0.5rem; flex-shrink: 0; }
    .metrics { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
    .meter-head { display: flex; justify-content: space-between; align-items: baseline; }
    .meter-score { font-size: 2.25rem; font-weight: bold; }
    .meter-track { height: 0.75rem; background: #eef2f2; border-radius: 999px; overflow: hidden; }
    .meter-fill { height: 100%; border-radius: 999px; transition: width 1s ease-out; }
    .meter-scale { display: flex; justify-content: space-between; font-size: 0.75rem; color: #8a8a8a; }
    .center { display: flex; justify-content: center; }
    .risk-badge { border: 1px solid; border-radius: 999px; padding: 0.5rem 1.25rem; font-weight: bold; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    textarea, input { width: 100%; padding: 0.5rem; box-sizing: border-box; }
    textarea { min-height: 140px; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; }
    #notice { margin: 1rem 0; font-weight: 600; }
    #notice.error { color: #b22222; }
  </style>
</head>
<body>
  <h1>Decision Trace Engine</h1>
  <p class="muted">Describe a decision and get an audit of its assumptions, biases and gaps.</p>

  <form id="decisionForm" class="card">
    <label for="decision">Describe a decision you made <span style="color:#b22222">*</span></label>
    <textarea id="decision" placeholder="e.g., I decided to accept a job offer at a startup instead of staying at my current stable corporate position..."></textarea>
    <label for="context">Additional context <span class="muted">(optional)</span></label>
    <input id="context" placeholder="e.g., I have 10 years of experience and a family to support..." />
    <button id="submitBtn" type="submit" disabled>Generate Decision Trace</button>
  </form>

  <div id="notice"></div>

  <div id="reportHeader" hidden>
    <h2>Decision Trace Report</h2>
    <p class="muted" id="reportDate"></p>
    <button id="exportBtn" type="button">Export as PDF</button>
    <button id="resetBtn" type="button">New Analysis</button>
  </div>
  <div id="report"></div>

  <script>
    const form = document.getElementById('decisionForm');
    const decisionInput = document.getElementById('decision');
    const contextInput = document.getElementById('context');
    const submitBtn = document.getElementById('submitBtn');
    const exportBtn = document.getElementById('exportBtn');
    const resetBtn = document.getElementById('resetBtn');
    const notice = document.getElementById('notice');
    const report = document.getElementById('report');
    const reportHeader = document.getElementById('reportHeader');
    let analysis = null;

    const messages = {
      400: 'Please describe the decision you want analyzed.',
      402: 'AI credits exhausted. Please add credits to continue.',
      429: 'Rate limit exceeded. Please try again in a moment.',
    };

    function showNotice(text, isError) {
      notice.textContent = text;
      notice.className = isError ? 'error' : '';
    }

    decisionInput.addEventListener('input', () => {
      submitBtn.disabled = !decisionInput.value.trim();
    });

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const decision = decisionInput.value.trim();
      if (!decision) return;
      const context = contextInput.value.trim();

      submitBtn.disabled = true;
      submitBtn.textContent = 'Analyzing Decision...';
      showNotice('Examining assumptions, biases, and alternative paths...', false);
      report.innerHTML = '';
      reportHeader.hidden = true;
      analysis = null;

      try {
        const res = await fetch('/api/analyze-decision', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ decision, context: context || null }),
        });
        const json = await res.json().catch(() => ({}));
        if (!res.ok) {
          showNotice(messages[res.status] || json.error || 'Analysis failed. Please try again.', true);
          return;
        }
        analysis = json;
        const cards = await fetch('/api/report/html', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(analysis),
        });
        if (!cards.ok) {
          analysis = null;
          showNotice('Analysis failed. Please try again.', true);
          return;
        }
        report.innerHTML = await cards.text();
        document.getElementById('reportDate').textContent =
          'Analysis complete • ' + new Date().toLocaleDateString();
        reportHeader.hidden = false;
        form.hidden = true;
        showNotice('', false);
      } catch (err) {
        showNotice('Analysis failed. Please try again.', true);
      } finally {
        submitBtn.textContent = 'Generate Decision Trace';
        submitBtn.disabled = !decisionInput.value.trim();
      }
    });

    resetBtn.addEventListener('click', () => {
      analysis = null;
      report.innerHTML = '';
      reportHeader.hidden = true;
      decisionInput.value = '';
      contextInput.value = '';
      submitBtn.disabled = true;
      form.hidden = false;
      showNotice('', false);
      decisionInput.focus();
    });

    exportBtn.addEventListener('click', async () => {
      if (!analysis) return;
      try {
        const res = await fetch('/api/report/pdf', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(analysis),
        });
        if (!res.ok) throw new Error('export failed');
        const disposition = res.headers.get('Content-Disposition') || '';
        const match = disposition.match(/filename="([^"]+)"/);
        const blob = await res.blob();
        const link = document.createElement('a');
        link.href = URL.createObjectURL(blob);
        link.download = match ? match[1] : 'decision-trace.pdf';
        link.click();
        URL.revokeObjectURL(link.href);
        showNotice('PDF Exported: your decision trace report has been downloaded.', false);
      } catch (err) {
        showNotice('Export Failed: unable to generate PDF. Please try again.', true);
      }
    });
  </script>
</body>
</html>"#)
}
