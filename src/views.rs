//! HTML views. Each view is a pure function of configuration and request
//! parameters; all interpolated values are escaped.

use crate::config::FieldNames;

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }}
.session-card {{ border: 1px solid #ccc; border-radius: 6px; padding: 1rem; margin-bottom: 1rem; }}
.session-card.confirmed {{ border-color: #2e7d32; }}
.session-card.declined {{ border-color: #c62828; }}
.hidden {{ display: none; }}
.error {{ color: #c62828; }}
.success {{ color: #2e7d32; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// The session listing and confirmation page for one person. The embedded
/// script drives the sessions and confirm endpoints.
pub fn lookup_page(person_id: &str, fields: &FieldNames) -> String {
    let person_id = escape(person_id);
    let session_name = escape(&fields.session_name);
    let role = escape(&fields.role);
    let confirmation = escape(&fields.confirmation);

    let body = format!(
        r#"<h1>Your Sessions</h1>
<input type="hidden" id="personId" value="{person_id}">
<input type="hidden" id="fieldSessionName" value="{session_name}">
<input type="hidden" id="fieldRole" value="{role}">
<input type="hidden" id="fieldConfirmation" value="{confirmation}">
<p id="loading">Loading your sessions&hellip;</p>
<p id="errorMessage" class="error hidden">Could not load your sessions. Please try again later.</p>
<p id="noSessions" class="hidden">No sessions are currently assigned to you.</p>
<form id="confirmationForm" class="hidden">
  <div id="sessionList"></div>
  <button type="submit">Submit confirmations</button>
  <p id="successMessage" class="success hidden">Confirmations updated successfully.</p>
</form>
<script>
document.addEventListener('DOMContentLoaded', () => {{
  const personId = document.getElementById('personId').value;
  const fieldSessionName = document.getElementById('fieldSessionName').value;
  const fieldRole = document.getElementById('fieldRole').value;
  const fieldConfirmation = document.getElementById('fieldConfirmation').value;
  const form = document.getElementById('confirmationForm');
  const sessionList = document.getElementById('sessionList');

  function show(id) {{ document.getElementById(id).classList.remove('hidden'); }}
  function hide(id) {{ document.getElementById(id).classList.add('hidden'); }}

  function sessionCard(record) {{
    const card = document.createElement('div');
    card.className = 'session-card';
    const title = document.createElement('h3');
    title.textContent = record.fields[fieldSessionName] || 'Unnamed Session';
    const role = document.createElement('p');
    role.textContent = record.fields[fieldRole] || 'Participant';
    const select = document.createElement('select');
    select.dataset.recordId = record.id;
    for (const option of ['', 'Yes', 'No']) {{
      const el = document.createElement('option');
      el.value = option;
      el.textContent = option || 'Select…';
      if ((record.fields[fieldConfirmation] || '') === option) el.selected = true;
      select.appendChild(el);
    }}
    select.addEventListener('change', () => {{
      card.classList.toggle('confirmed', select.value === 'Yes');
      card.classList.toggle('declined', select.value === 'No');
    }});
    card.append(title, role, select);
    return card;
  }}

  async function loadSessions() {{
    try {{
      const response = await fetch(`/api/sessions/${{personId}}`);
      if (!response.ok) throw new Error(`status ${{response.status}}`);
      const data = await response.json();
      hide('loading');
      if (!data.records || data.records.length === 0) {{ show('noSessions'); return; }}
      for (const record of data.records) sessionList.appendChild(sessionCard(record));
      show('confirmationForm');
    }} catch (err) {{
      hide('loading');
      show('errorMessage');
    }}
  }}

  form.addEventListener('submit', async (event) => {{
    event.preventDefault();
    const updates = [];
    for (const select of sessionList.querySelectorAll('select')) {{
      if (select.value) {{
        updates.push({{ id: select.dataset.recordId, fields: {{ [fieldConfirmation]: select.value }} }});
      }}
    }}
    if (updates.length === 0) return;
    try {{
      const response = await fetch('/api/sessions/confirm', {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify({{ records: updates }}),
      }});
      if (!response.ok) throw new Error(`status ${{response.status}}`);
      show('successMessage');
    }} catch (err) {{
      hide('successMessage');
      show('errorMessage');
    }}
  }});

  loadSessions();
}});
</script>"#
    );

    page("Your Sessions", &body)
}

/// Read-only view of the resolved field-name configuration. Credentials
/// are deliberately not shown.
pub fn admin_page(fields: &FieldNames) -> String {
    let body = format!(
        r#"<h1>Field Configuration</h1>
<table>
<tr><td>Person assigned</td><td>{}</td></tr>
<tr><td>Session name</td><td>{}</td></tr>
<tr><td>Role</td><td>{}</td></tr>
<tr><td>Confirmation</td><td>{}</td></tr>
</table>"#,
        escape(&fields.person_assigned),
        escape(&fields.session_name),
        escape(&fields.role),
        escape(&fields.confirmation),
    );

    page("Field Configuration", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"<h1>Something went wrong</h1>
<p class="error">{}</p>"#,
        escape(message)
    );

    page("Error", &body)
}
