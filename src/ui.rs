use crate::models::Habit;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render_index(habits: &[Habit]) -> String {
    INDEX_HTML.replace("{{HABITS}}", &render_habit_list(habits))
}

pub fn render_habit_list(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return r#"<p class="empty-state">No habits added yet.</p>"#.to_string();
    }
    habits.iter().map(render_habit).collect()
}

fn render_habit(habit: &Habit) -> String {
    let days = habit
        .days
        .iter()
        .map(|day| DAY_NAMES.get(usize::from(*day)).copied().unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(", ");
    let (toggle_class, toggle_mark) = if habit.completed {
        ("toggle completed", "&#10003;")
    } else {
        ("toggle", "&#9675;")
    };
    let description = if habit.description.trim().is_empty() {
        String::new()
    } else {
        format!(
            "\n        <p class=\"habit-description\">{}</p>",
            escape_html(&habit.description)
        )
    };
    format!(
        r#"<div class="habit-item">
      <button class="{toggle_class}" data-id="{id}">{toggle_mark}</button>
      <div class="habit-info">
        <h3 class="habit-name">{name}</h3>{description}
        <p class="habit-details">{time} on {days}</p>
      </div>
      <span class="streak">&#127942; {streak}</span>
      <button class="delete-habit" data-id="{id}">&#10005;</button>
    </div>
"#,
        id = habit.id,
        name = escape_html(&habit.name),
        time = habit.time,
        streak = habit.streak,
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Reminder</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f5f3ff;
      --bg-2: #e0e7ff;
      --ink: #1f2937;
      --accent: #9333ea;
      --accent-2: #4f46e5;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(79, 70, 229, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffffff 60%, #eef2ff 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
      background: linear-gradient(90deg, var(--accent), var(--accent-2));
      -webkit-background-clip: text;
      background-clip: text;
      color: transparent;
    }

    .bell {
      font-size: 1.8rem;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #6b7280;
      font-size: 1rem;
    }

    .quote-card {
      background: linear-gradient(135deg, var(--accent), var(--accent-2));
      color: white;
      border-radius: 20px;
      padding: 26px;
      box-shadow: 0 16px 36px rgba(147, 51, 234, 0.28);
    }

    .quote-card blockquote {
      margin: 0 0 10px;
      font-size: 1.15rem;
      font-style: italic;
      font-weight: 300;
      line-height: 1.5;
    }

    .quote-card cite {
      display: block;
      font-style: normal;
      font-size: 0.9rem;
      color: rgba(255, 255, 255, 0.9);
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 24px;
      border: 1px solid rgba(79, 70, 229, 0.1);
      display: grid;
      gap: 16px;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .field {
      display: grid;
      gap: 6px;
    }

    .field label {
      font-size: 0.85rem;
      font-weight: 600;
      color: #4b5563;
    }

    input[type="text"],
    input[type="time"],
    textarea {
      border: 1px solid rgba(79, 70, 229, 0.25);
      border-radius: 12px;
      padding: 10px 12px;
      font-size: 1rem;
      font-family: inherit;
      color: var(--ink);
    }

    input:focus,
    textarea:focus {
      outline: 2px solid var(--accent-2);
      outline-offset: 1px;
    }

    .days {
      border: none;
      margin: 0;
      padding: 0;
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .days legend {
      font-size: 0.85rem;
      font-weight: 600;
      color: #4b5563;
      padding: 0 0 6px;
    }

    .days label {
      display: inline-flex;
      align-items: center;
      gap: 5px;
      background: rgba(79, 70, 229, 0.08);
      border-radius: 999px;
      padding: 6px 12px;
      font-size: 0.9rem;
      cursor: pointer;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      font-family: inherit;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
      display: inline-flex;
      align-items: center;
      justify-content: center;
      gap: 8px;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-primary {
      background: linear-gradient(90deg, var(--accent), var(--accent-2));
      color: white;
      box-shadow: 0 10px 24px rgba(147, 51, 234, 0.3);
      width: 100%;
    }

    .btn-ghost {
      background: transparent;
      color: var(--accent-2);
      border: 1px solid rgba(79, 70, 229, 0.4);
      padding: 8px 14px;
      font-size: 0.9rem;
    }

    .list-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .habit-item {
      display: flex;
      align-items: center;
      gap: 14px;
      background: white;
      border: 1px solid rgba(79, 70, 229, 0.12);
      border-radius: 16px;
      padding: 14px 16px;
    }

    .toggle {
      background: transparent;
      color: var(--accent);
      font-size: 1.5rem;
      padding: 4px 8px;
    }

    .toggle.completed {
      color: #16a34a;
    }

    .habit-info {
      flex: 1;
      min-width: 0;
    }

    .habit-name {
      margin: 0;
      font-size: 1.1rem;
    }

    .habit-description {
      margin: 4px 0 0;
      color: #6b7280;
      font-size: 0.92rem;
    }

    .habit-details {
      margin: 4px 0 0;
      color: #8b8fa3;
      font-size: 0.85rem;
    }

    .streak {
      background: #fffbeb;
      color: #b45309;
      border-radius: 999px;
      padding: 6px 12px;
      font-weight: 600;
      font-size: 0.9rem;
      white-space: nowrap;
    }

    .delete-habit {
      background: transparent;
      color: #dc2626;
      font-size: 1rem;
      padding: 6px 10px;
    }

    .empty-state {
      margin: 0;
      text-align: center;
      color: #6b7280;
      padding: 24px 0;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .modal {
      position: fixed;
      inset: 0;
      display: none;
      align-items: center;
      justify-content: center;
      background: rgba(31, 41, 55, 0.55);
      padding: 18px;
    }

    .modal-card {
      background: white;
      border-radius: 20px;
      padding: 28px;
      width: min(420px, 100%);
      display: grid;
      gap: 14px;
      box-shadow: var(--shadow);
    }

    .modal-card p {
      margin: 0;
      color: #4b5563;
    }

    .modal-actions {
      display: flex;
      gap: 10px;
      justify-content: flex-end;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    .fade-in {
      animation: rise 300ms ease;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      .habit-item {
        flex-wrap: wrap;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Habit Reminder</h1>
        <p class="subtitle">Build routines and get a nudge right on time.</p>
      </div>
      <span class="bell" aria-hidden="true">&#128276;</span>
    </header>

    <section class="quote-card">
      <blockquote id="quote-text">Loading your daily motivation...</blockquote>
      <cite id="quote-author"></cite>
    </section>

    <section class="card">
      <h2>Add New Habit</h2>
      <form id="habit-form">
        <div class="field">
          <label for="habit-name">Habit Name</label>
          <input type="text" id="habit-name" placeholder="Enter habit name" required />
        </div>
        <div class="field">
          <label for="habit-description">Description</label>
          <textarea id="habit-description" placeholder="Describe your habit" rows="2"></textarea>
        </div>
        <div class="field">
          <label for="habit-time">Reminder Time</label>
          <input type="time" id="habit-time" value="09:00" required />
        </div>
        <fieldset class="days" id="reminder-days">
          <legend>Reminder Days</legend>
          <label><input type="checkbox" value="0" /> Sun</label>
          <label><input type="checkbox" value="1" /> Mon</label>
          <label><input type="checkbox" value="2" /> Tue</label>
          <label><input type="checkbox" value="3" /> Wed</label>
          <label><input type="checkbox" value="4" /> Thu</label>
          <label><input type="checkbox" value="5" /> Fri</label>
          <label><input type="checkbox" value="6" /> Sat</label>
        </fieldset>
        <button class="btn-primary" type="submit">Add Habit</button>
      </form>
    </section>

    <section class="card">
      <div class="list-header">
        <h2>Your Habits</h2>
        <button class="btn-ghost" id="test-notification" type="button">Test Notification</button>
      </div>
      <div id="habits-list">{{HABITS}}</div>
      <div class="status" id="status"></div>
    </section>
  </main>

  <div class="modal" id="permission-modal">
    <div class="modal-card">
      <h2>Enable Notifications</h2>
      <p>Get reminded when a habit is due, even while this tab is in the background.</p>
      <div class="modal-actions">
        <button class="btn-ghost" id="deny-notifications" type="button">Not Now</button>
        <button class="btn-primary" id="allow-notifications" type="button" style="width: auto;">Allow</button>
      </div>
    </div>
  </div>

  <script>
    const DAY_NAMES = ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'];

    const habitForm = document.getElementById('habit-form');
    const habitsList = document.getElementById('habits-list');
    const statusEl = document.getElementById('status');
    const quoteTextEl = document.getElementById('quote-text');
    const quoteAuthorEl = document.getElementById('quote-author');
    const testBtn = document.getElementById('test-notification');
    const permissionModal = document.getElementById('permission-modal');
    const allowBtn = document.getElementById('allow-notifications');
    const denyBtn = document.getElementById('deny-notifications');

    const seenNotifications = new Set();

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const renderHabit = (habit) => {
      const item = document.createElement('div');
      item.className = 'habit-item fade-in';

      const toggle = document.createElement('button');
      toggle.className = habit.completed ? 'toggle completed' : 'toggle';
      toggle.textContent = habit.completed ? '✓' : '○';
      toggle.title = habit.completed ? 'Completed today' : 'Mark as done';
      toggle.addEventListener('click', () => {
        toggleHabit(habit.id).catch((err) => setStatus(err.message, 'error'));
      });

      const info = document.createElement('div');
      info.className = 'habit-info';

      const name = document.createElement('h3');
      name.className = 'habit-name';
      name.textContent = habit.name;
      info.appendChild(name);

      if (habit.description) {
        const description = document.createElement('p');
        description.className = 'habit-description';
        description.textContent = habit.description;
        info.appendChild(description);
      }

      const details = document.createElement('p');
      details.className = 'habit-details';
      details.textContent =
        habit.time + ' on ' + habit.days.map((day) => DAY_NAMES[day]).join(', ');
      info.appendChild(details);

      const streak = document.createElement('span');
      streak.className = 'streak';
      streak.textContent = '\u{1F3C6} ' + habit.streak;

      const remove = document.createElement('button');
      remove.className = 'delete-habit';
      remove.textContent = '✕';
      remove.title = 'Delete habit';
      remove.addEventListener('click', () => {
        deleteHabit(habit.id).catch((err) => setStatus(err.message, 'error'));
      });

      item.appendChild(toggle);
      item.appendChild(info);
      item.appendChild(streak);
      item.appendChild(remove);
      return item;
    };

    const loadHabits = async () => {
      const res = await fetch('/api/habits');
      if (!res.ok) {
        throw new Error('Unable to load habits');
      }
      const habits = await res.json();
      habitsList.innerHTML = '';
      if (habits.length === 0) {
        const empty = document.createElement('p');
        empty.className = 'empty-state';
        empty.textContent = 'No habits added yet.';
        habitsList.appendChild(empty);
        return;
      }
      habits.forEach((habit) => habitsList.appendChild(renderHabit(habit)));
    };

    const addHabit = async () => {
      const name = document.getElementById('habit-name').value.trim();
      const description = document.getElementById('habit-description').value.trim();
      const time = document.getElementById('habit-time').value;
      const days = Array.from(
        document.querySelectorAll('#reminder-days input[type="checkbox"]:checked')
      ).map((box) => parseInt(box.value, 10));

      if (!name || !time || days.length === 0) {
        alert('Please fill in all fields');
        return;
      }

      const res = await fetch('/api/habits', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ name, description, time, days })
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to save habit');
      }

      habitForm.reset();
      setStatus('Habit saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
      await loadHabits();
    };

    const toggleHabit = async (id) => {
      const res = await fetch('/api/habits/' + id + '/toggle', { method: 'POST' });
      if (!res.ok) {
        throw new Error('Unable to update habit');
      }
      await loadHabits();
    };

    const deleteHabit = async (id) => {
      const res = await fetch('/api/habits/' + id, { method: 'DELETE' });
      if (!res.ok) {
        throw new Error('Unable to delete habit');
      }
      await loadHabits();
    };

    const loadQuote = async () => {
      const res = await fetch('/api/quote');
      if (!res.ok) {
        throw new Error('Unable to load quote');
      }
      const quote = await res.json();
      quoteTextEl.textContent = '"' + quote.text + '"';
      quoteAuthorEl.textContent = '— ' + quote.author;
    };

    const postPermission = async (permission) => {
      await fetch('/api/permission', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ permission })
      });
    };

    const syncPermission = async () => {
      if (!('Notification' in window)) {
        return;
      }
      const browser = Notification.permission;
      if (browser === 'default') {
        permissionModal.style.display = 'flex';
        return;
      }
      const res = await fetch('/api/permission');
      const data = await res.json();
      if (data.permission !== browser) {
        await postPermission(browser);
      }
    };

    const showBrowserNotification = (entry) => {
      const notification = new Notification(entry.title, {
        body: entry.body,
        tag: entry.tag,
        requireInteraction: entry.require_interaction,
        icon: entry.icon
      });
      setTimeout(() => notification.close(), 15000);
      if (entry.sound) {
        new Audio(entry.sound).play().catch(() => {});
      }
      if (entry.vibration && 'vibrate' in navigator) {
        navigator.vibrate(entry.vibration);
      }
    };

    const pollNotifications = async () => {
      const res = await fetch('/api/notifications');
      if (!res.ok) {
        return;
      }
      const entries = await res.json();
      entries.forEach((entry) => {
        if (seenNotifications.has(entry.id)) {
          return;
        }
        seenNotifications.add(entry.id);
        if ('Notification' in window && Notification.permission === 'granted') {
          showBrowserNotification(entry);
        }
        fetch('/api/notifications/' + entry.id, { method: 'DELETE' }).catch(() => {});
      });
    };

    habitForm.addEventListener('submit', (event) => {
      event.preventDefault();
      addHabit().catch((err) => setStatus(err.message, 'error'));
    });

    testBtn.addEventListener('click', () => {
      const run = async () => {
        const res = await fetch('/api/notifications/test', { method: 'POST' });
        const data = await res.json();
        if (data.outcome === 'delivered') {
          setStatus('Test notification sent', 'ok');
          await pollNotifications();
        } else if (data.outcome === 'awaiting-permission') {
          setStatus('Waiting for notification permission', '');
        } else {
          setStatus('Notifications are blocked in this browser', 'error');
        }
      };
      run().catch((err) => setStatus(err.message, 'error'));
    });

    allowBtn.addEventListener('click', () => {
      Notification.requestPermission().then((permission) => {
        permissionModal.style.display = 'none';
        if (permission === 'granted' || permission === 'denied') {
          postPermission(permission).catch(() => {});
        }
      });
    });

    denyBtn.addEventListener('click', () => {
      permissionModal.style.display = 'none';
    });

    loadHabits().catch((err) => setStatus(err.message, 'error'));
    loadQuote().catch(() => {
      quoteTextEl.textContent = 'Keep showing up for yourself.';
    });
    syncPermission().catch(() => {});
    pollNotifications().catch(() => {});
    setInterval(() => {
      pollNotifications().catch(() => {});
    }, 5000);
  </script>
</body>
</html>
"#;
