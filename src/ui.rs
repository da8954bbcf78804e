use crate::mood::mood_label;
use crate::session::SessionState;

pub fn render_index(state: &SessionState) -> String {
    INDEX_HTML
        .replace("{{USER}}", &escape_html(&state.user_name))
        .replace("{{MOOD}}", &state.mood_level.to_string())
        .replace("{{MOOD_LABEL}}", mood_label(state.mood_level))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>MindWell</title>
</head>
<body>
  <main>
    <h1>Hello, <span id="user">{{USER}}</span></h1>

    <section>
      <h2>Mood</h2>
      <input id="mood" type="range" min="0" max="9" value="{{MOOD}}" />
      <span id="mood-label">{{MOOD_LABEL}}</span>
      <button id="save-mood" type="button">Save mood</button>
    </section>

    <section>
      <h2>Chat</h2>
      <ol id="transcript"></ol>
      <form id="chat-form">
        <input id="message" autocomplete="off" />
        <button id="send" type="submit">Send</button>
      </form>
    </section>

    <p id="status"></p>
  </main>

  <script>
    const labels = ['Very Low', 'Low', 'Down', 'Okay', 'Good', 'Happy', 'Great', 'Amazing', 'Fantastic', 'Euphoric'];
    const moodEl = document.getElementById('mood');
    const moodLabelEl = document.getElementById('mood-label');
    const transcriptEl = document.getElementById('transcript');
    const messageEl = document.getElementById('message');
    const sendEl = document.getElementById('send');
    const statusEl = document.getElementById('status');
    let polling = null;

    const setStatus = (message) => {
      statusEl.textContent = message;
    };

    const render = (session) => {
      transcriptEl.replaceChildren(...session.transcript.map((turn) => {
        const item = document.createElement('li');
        item.dataset.role = turn.role;
        item.textContent = `${turn.role === 'user' ? 'You' : 'MindWell'}: ${turn.content}`;
        return item;
      }));
      sendEl.disabled = session.pending;
      setStatus(session.pending ? 'Thinking...' : '');
      if (session.pending && !polling) {
        polling = setInterval(() => refresh().catch((err) => setStatus(err.message)), 700);
      } else if (!session.pending && polling) {
        clearInterval(polling);
        polling = null;
      }
    };

    const refresh = async () => {
      const res = await fetch('/api/session');
      if (!res.ok) {
        throw new Error('Unable to load session');
      }
      render(await res.json());
    };

    moodEl.addEventListener('input', () => {
      moodLabelEl.textContent = labels[Number(moodEl.value)];
    });

    document.getElementById('save-mood').addEventListener('click', async () => {
      const res = await fetch('/api/mood', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ mood_level: Number(moodEl.value), note: '' })
      });
      setStatus(res.ok ? 'Mood saved' : await res.text());
    });

    document.getElementById('chat-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const message = messageEl.value;
      if (!message.trim()) {
        return;
      }
      const res = await fetch('/api/chat', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ message, mood_level: Number(moodEl.value) })
      });
      if (!res.ok) {
        setStatus(await res.text());
        return;
      }
      messageEl.value = '';
      render(await res.json());
    });

    refresh().catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
