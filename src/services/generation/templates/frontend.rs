//! React and TypeScript client templates.

use super::{FeatureName, Topic};
use crate::domain::models::GeneratedFile;

pub(super) fn files(topic: Topic, name: &FeatureName) -> Vec<GeneratedFile> {
    let files = match topic {
        Topic::Authentication => vec![
            ("src/api/authClient.ts", AUTH_CLIENT.to_string()),
            ("src/context/AuthContext.tsx", AUTH_CONTEXT.to_string()),
            ("src/components/LoginForm.tsx", LOGIN_FORM.to_string()),
            ("src/components/RegisterForm.tsx", REGISTER_FORM.to_string()),
            ("src/styles/auth.css", AUTH_CSS.to_string()),
        ],
        Topic::TaskManagement => vec![
            ("src/api/tasksClient.ts", TASKS_CLIENT.to_string()),
            ("src/components/TaskList.tsx", TASK_LIST.to_string()),
            ("src/components/TaskItem.tsx", TASK_ITEM.to_string()),
            ("src/components/TaskForm.tsx", TASK_FORM.to_string()),
            ("src/styles/tasks.css", TASKS_CSS.to_string()),
        ],
        Topic::Collaboration => vec![
            ("src/api/sharesClient.ts", SHARES_CLIENT.to_string()),
            ("src/components/ShareDialog.tsx", SHARE_DIALOG.to_string()),
            ("src/styles/sharing.css", SHARING_CSS.to_string()),
        ],
        Topic::Data | Topic::Api | Topic::Generic => {
            return generic(name);
        }
    };

    files
        .into_iter()
        .map(|(path, content)| GeneratedFile::classified(path, content))
        .collect()
}

fn generic(name: &FeatureName) -> Vec<GeneratedFile> {
    let component = name.pascal();
    let css_class = name.kebab();
    let heading = name.phrase();

    let tsx = format!(
        r#"import React, {{ useState }} from 'react';
import '../styles/{css_class}.css';

export default function {component}() {{
  const [expanded, setExpanded] = useState(true);

  return (
    <section className="{css_class}">
      <header className="{css_class}__header">
        <h2>{heading}</h2>
        <button type="button" onClick={{() => setExpanded((value) => !value)}}>
          {{expanded ? 'Hide' : 'Show'}}
        </button>
      </header>
      {{expanded && <div className="{css_class}__body">Content for {heading} goes here.</div>}}
    </section>
  );
}}
"#
    );

    let css = format!(
        r".{css_class} {{
  border: 1px solid #e2e8f0;
  border-radius: 8px;
  padding: 1rem 1.5rem;
  margin: 1rem auto;
  max-width: 960px;
}}

.{css_class}__header {{
  display: flex;
  align-items: center;
  justify-content: space-between;
}}

.{css_class}__body {{
  margin-top: 0.75rem;
  color: #4a5568;
}}

@media (max-width: 640px) {{
  .{css_class} {{
    padding: 0.75rem;
    margin: 0.5rem;
  }}
}}
"
    );

    vec![
        GeneratedFile::classified(format!("src/components/{component}.tsx"), tsx),
        GeneratedFile::classified(format!("src/styles/{css_class}.css"), css),
    ]
}

const AUTH_CLIENT: &str = r#"export interface AuthUser {
  id: string;
  name: string;
  email: string;
}

export interface AuthResponse {
  token: string;
  user: AuthUser;
}

const TOKEN_KEY = 'auth_token';

async function post<T>(path: string, body: unknown): Promise<T> {
  let response: Response;
  try {
    response = await fetch(`/api/auth${path}`, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(body),
    });
  } catch (err) {
    throw new Error('Unable to reach the server. Is the backend running?');
  }

  const payload = await response.json().catch(() => ({}));
  if (!response.ok) {
    throw new Error(payload.error ?? `Request failed with status ${response.status}`);
  }
  return payload as T;
}

export const authClient = {
  login(email: string, password: string): Promise<AuthResponse> {
    return post<AuthResponse>('/login', { email, password });
  },

  register(name: string, email: string, password: string): Promise<AuthResponse> {
    return post<AuthResponse>('/register', { name, email, password });
  },

  saveToken(token: string): void {
    localStorage.setItem(TOKEN_KEY, token);
  },

  getToken(): string | null {
    return localStorage.getItem(TOKEN_KEY);
  },

  clearToken(): void {
    localStorage.removeItem(TOKEN_KEY);
  },
};
"#;

const AUTH_CONTEXT: &str = r#"import React, { createContext, useCallback, useContext, useMemo, useState } from 'react';
import { authClient, AuthUser } from '../api/authClient';

interface AuthContextValue {
  user: AuthUser | null;
  token: string | null;
  login: (email: string, password: string) => Promise<void>;
  register: (name: string, email: string, password: string) => Promise<void>;
  logout: () => void;
}

const AuthContext = createContext<AuthContextValue | undefined>(undefined);

interface AuthProviderProps {
  children: React.ReactNode;
}

export function AuthProvider({ children }: AuthProviderProps) {
  const [user, setUser] = useState<AuthUser | null>(null);
  const [token, setToken] = useState<string | null>(() => authClient.getToken());

  const login = useCallback(async (email: string, password: string) => {
    const result = await authClient.login(email, password);
    authClient.saveToken(result.token);
    setToken(result.token);
    setUser(result.user);
  }, []);

  const register = useCallback(async (name: string, email: string, password: string) => {
    const result = await authClient.register(name, email, password);
    authClient.saveToken(result.token);
    setToken(result.token);
    setUser(result.user);
  }, []);

  const logout = useCallback(() => {
    authClient.clearToken();
    setToken(null);
    setUser(null);
  }, []);

  const value = useMemo(
    () => ({ user, token, login, register, logout }),
    [user, token, login, register, logout],
  );

  return <AuthContext.Provider value={value}>{children}</AuthContext.Provider>;
}

export function useAuth(): AuthContextValue {
  const context = useContext(AuthContext);
  if (!context) {
    throw new Error('useAuth must be used within an AuthProvider');
  }
  return context;
}
"#;

const LOGIN_FORM: &str = r#"import React, { useState } from 'react';
import { useAuth } from '../context/AuthContext';
import '../styles/auth.css';

export default function LoginForm() {
  const { user, login, logout } = useAuth();
  const [email, setEmail] = useState('');
  const [password, setPassword] = useState('');
  const [error, setError] = useState<string | null>(null);
  const [submitting, setSubmitting] = useState(false);

  const handleSubmit = async (event: React.FormEvent<HTMLFormElement>) => {
    event.preventDefault();
    if (!email.includes('@') || password.length < 8) {
      setError('Enter a valid email and a password of at least 8 characters.');
      return;
    }
    setSubmitting(true);
    setError(null);
    try {
      await login(email, password);
      setPassword('');
    } catch (err) {
      setError(err instanceof Error ? err.message : 'Login failed');
    } finally {
      setSubmitting(false);
    }
  };

  if (user) {
    return (
      <div className="auth-status">
        <span>Signed in as {user.name}</span>
        <button type="button" onClick={logout}>Sign out</button>
      </div>
    );
  }

  return (
    <form className="auth-form" aria-label="Sign in" onSubmit={handleSubmit} noValidate>
      <h2>Sign in</h2>
      {error && <p className="auth-error" role="alert">{error}</p>}
      <label htmlFor="login-email">Email</label>
      <input
        id="login-email"
        aria-label="Email"
        name="email"
        type="email"
        autoComplete="email"
        value={email}
        onChange={(e) => setEmail(e.target.value)}
        required
      />
      <label htmlFor="login-password">Password</label>
      <input
        id="login-password"
        aria-label="Password"
        name="password"
        type="password"
        autoComplete="current-password"
        value={password}
        onChange={(e) => setPassword(e.target.value)}
        required
      />
      <button type="submit" disabled={submitting}>
        {submitting ? 'Signing in...' : 'Sign in'}
      </button>
    </form>
  );
}
"#;

const REGISTER_FORM: &str = r#"import React, { useState } from 'react';
import { useAuth } from '../context/AuthContext';
import '../styles/auth.css';

export default function RegisterForm() {
  const { user, register } = useAuth();
  const [name, setName] = useState('');
  const [email, setEmail] = useState('');
  const [password, setPassword] = useState('');
  const [confirm, setConfirm] = useState('');
  const [error, setError] = useState<string | null>(null);
  const [submitting, setSubmitting] = useState(false);

  if (user) {
    return null;
  }

  const handleSubmit = async (event: React.FormEvent<HTMLFormElement>) => {
    event.preventDefault();
    if (password !== confirm) {
      setError('Passwords do not match.');
      return;
    }
    if (password.length < 8) {
      setError('Password must be at least 8 characters.');
      return;
    }
    setSubmitting(true);
    setError(null);
    try {
      await register(name.trim(), email.trim(), password);
    } catch (err) {
      setError(err instanceof Error ? err.message : 'Registration failed');
    } finally {
      setSubmitting(false);
    }
  };

  return (
    <form className="auth-form" aria-label="Create account" onSubmit={handleSubmit} noValidate>
      <h2>Create account</h2>
      {error && <p className="auth-error" role="alert">{error}</p>}
      <label htmlFor="register-name">Name</label>
      <input
        id="register-name"
        aria-label="Name"
        name="name"
        value={name}
        onChange={(e) => setName(e.target.value)}
        required
      />
      <label htmlFor="register-email">Email</label>
      <input
        id="register-email"
        aria-label="Email"
        name="email"
        type="email"
        value={email}
        onChange={(e) => setEmail(e.target.value)}
        required
      />
      <label htmlFor="register-password">Password</label>
      <input
        id="register-password"
        aria-label="Password"
        name="password"
        type="password"
        autoComplete="new-password"
        value={password}
        onChange={(e) => setPassword(e.target.value)}
        required
      />
      <label htmlFor="register-confirm">Confirm password</label>
      <input
        id="register-confirm"
        aria-label="Confirm password"
        name="confirm"
        type="password"
        value={confirm}
        onChange={(e) => setConfirm(e.target.value)}
        required
      />
      <button type="submit" disabled={submitting}>
        {submitting ? 'Creating account...' : 'Create account'}
      </button>
    </form>
  );
}
"#;

const AUTH_CSS: &str = r".auth-form {
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  max-width: 360px;
  margin: 2rem auto;
  padding: 1.5rem;
  border: 1px solid #e2e8f0;
  border-radius: 8px;
  background: #ffffff;
}

.auth-form input {
  padding: 0.5rem 0.75rem;
  border: 1px solid #cbd5e0;
  border-radius: 4px;
}

.auth-form button {
  margin-top: 0.5rem;
  padding: 0.6rem;
  border: none;
  border-radius: 4px;
  background: #3182ce;
  color: #ffffff;
  cursor: pointer;
}

.auth-form button:disabled {
  opacity: 0.6;
  cursor: progress;
}

.auth-error {
  color: #c53030;
  margin: 0;
}

.auth-status {
  display: flex;
  gap: 1rem;
  align-items: center;
  justify-content: flex-end;
  padding: 0.5rem 1rem;
}

@media (max-width: 640px) {
  .auth-form {
    margin: 1rem;
    max-width: none;
  }
}
";

const TASKS_CLIENT: &str = r#"export type TaskStatus = 'todo' | 'in_progress' | 'done';

export interface Task {
  id: string;
  title: string;
  description: string;
  status: TaskStatus;
  dueDate: string | null;
  createdAt: string;
}

export interface TaskInput {
  title: string;
  description?: string;
  dueDate?: string | null;
}

function headers(): HeadersInit {
  const token = localStorage.getItem('auth_token');
  return token
    ? { 'Content-Type': 'application/json', Authorization: `Bearer ${token}` }
    : { 'Content-Type': 'application/json' };
}

async function send<T>(path: string, init: RequestInit = {}): Promise<T> {
  let response: Response;
  try {
    response = await fetch(`/api/tasks${path}`, { ...init, headers: headers() });
  } catch (err) {
    throw new Error('Unable to reach the server. Is the backend running?');
  }
  if (response.status === 204) {
    return undefined as T;
  }
  const payload = await response.json().catch(() => ({}));
  if (!response.ok) {
    throw new Error(payload.error ?? `Request failed with status ${response.status}`);
  }
  return payload as T;
}

export const tasksClient = {
  list(status?: TaskStatus): Promise<Task[]> {
    return send<Task[]>(status ? `?status=${status}` : '');
  },

  create(input: TaskInput): Promise<Task> {
    return send<Task>('', { method: 'POST', body: JSON.stringify(input) });
  },

  update(id: string, changes: Partial<TaskInput> & { status?: TaskStatus }): Promise<Task> {
    return send<Task>(`/${id}`, { method: 'PATCH', body: JSON.stringify(changes) });
  },

  remove(id: string): Promise<void> {
    return send<void>(`/${id}`, { method: 'DELETE' });
  },
};
"#;

const TASK_LIST: &str = r#"import React, { useCallback, useEffect, useState } from 'react';
import { Task, TaskInput, tasksClient } from '../api/tasksClient';
import TaskForm from './TaskForm';
import TaskItem from './TaskItem';
import '../styles/tasks.css';

export default function TaskList() {
  const [tasks, setTasks] = useState<Task[]>([]);
  const [loading, setLoading] = useState(true);
  const [error, setError] = useState<string | null>(null);

  const load = useCallback(async () => {
    setLoading(true);
    try {
      setTasks(await tasksClient.list());
      setError(null);
    } catch (err) {
      setError(err instanceof Error ? err.message : 'Could not load tasks');
    } finally {
      setLoading(false);
    }
  }, []);

  useEffect(() => {
    load();
  }, [load]);

  const handleCreate = async (input: TaskInput) => {
    try {
      const created = await tasksClient.create(input);
      setTasks((current) => [created, ...current]);
    } catch (err) {
      setError(err instanceof Error ? err.message : 'Could not create task');
    }
  };

  const handleToggle = async (task: Task) => {
    const status = task.status === 'done' ? 'todo' : 'done';
    try {
      const updated = await tasksClient.update(task.id, { status });
      setTasks((current) => current.map((t) => (t.id === updated.id ? updated : t)));
    } catch (err) {
      setError(err instanceof Error ? err.message : 'Could not update task');
    }
  };

  const handleDelete = async (task: Task) => {
    try {
      await tasksClient.remove(task.id);
      setTasks((current) => current.filter((t) => t.id !== task.id));
    } catch (err) {
      setError(err instanceof Error ? err.message : 'Could not delete task');
    }
  };

  return (
    <section className="task-list">
      <h2>Tasks</h2>
      <TaskForm onCreate={handleCreate} />
      {error && <p className="task-error" role="alert">{error}</p>}
      {loading ? (
        <p className="task-empty">Loading tasks...</p>
      ) : tasks.length === 0 ? (
        <p className="task-empty">No tasks yet. Add one above.</p>
      ) : (
        <ul>
          {tasks.map((task) => (
            <TaskItem key={task.id} task={task} onToggle={handleToggle} onDelete={handleDelete} />
          ))}
        </ul>
      )}
    </section>
  );
}
"#;

const TASK_ITEM: &str = r#"import React from 'react';
import { Task } from '../api/tasksClient';

interface TaskItemProps {
  task: Task;
  onToggle: (task: Task) => void;
  onDelete: (task: Task) => void;
}

export default function TaskItem({ task, onToggle, onDelete }: TaskItemProps) {
  const done = task.status === 'done';

  return (
    <li className={done ? 'task-item task-item--done' : 'task-item'}>
      <input
        type="checkbox"
        aria-label={`Mark ${task.title} as ${done ? 'not done' : 'done'}`}
        checked={done}
        onChange={() => onToggle(task)}
      />
      <div className="task-item__text">
        <span className="task-item__title">{task.title}</span>
        {task.description && <span className="task-item__description">{task.description}</span>}
        {task.dueDate && <time dateTime={task.dueDate}>Due {new Date(task.dueDate).toLocaleDateString()}</time>}
      </div>
      <button type="button" className="task-item__delete" onClick={() => onDelete(task)}>
        Delete
      </button>
    </li>
  );
}
"#;

const TASK_FORM: &str = r#"import React, { useState } from 'react';
import { TaskInput } from '../api/tasksClient';

interface TaskFormProps {
  onCreate: (input: TaskInput) => Promise<void>;
}

export default function TaskForm({ onCreate }: TaskFormProps) {
  const [title, setTitle] = useState('');
  const [description, setDescription] = useState('');
  const [dueDate, setDueDate] = useState('');
  const [saving, setSaving] = useState(false);

  const handleSubmit = async (event: React.FormEvent<HTMLFormElement>) => {
    event.preventDefault();
    if (!title.trim()) {
      return;
    }
    setSaving(true);
    try {
      await onCreate({ title: title.trim(), description: description.trim(), dueDate: dueDate || null });
      setTitle('');
      setDescription('');
      setDueDate('');
    } finally {
      setSaving(false);
    }
  };

  return (
    <form className="task-form" aria-label="New task" onSubmit={handleSubmit}>
      <input
        aria-label="Task title"
        name="title"
        placeholder="What needs to be done?"
        value={title}
        onChange={(e) => setTitle(e.target.value)}
        required
      />
      <textarea
        aria-label="Task description"
        name="description"
        placeholder="Details (optional)"
        value={description}
        onChange={(e) => setDescription(e.target.value)}
      />
      <input
        aria-label="Due date"
        name="dueDate"
        type="date"
        value={dueDate}
        onChange={(e) => setDueDate(e.target.value)}
      />
      <button type="submit" disabled={saving || !title.trim()}>
        {saving ? 'Adding...' : 'Add task'}
      </button>
    </form>
  );
}
"#;

const TASKS_CSS: &str = r".task-list {
  max-width: 720px;
  margin: 2rem auto;
  padding: 0 1rem;
}

.task-list ul {
  list-style: none;
  padding: 0;
}

.task-form {
  display: grid;
  grid-template-columns: 2fr 1fr auto;
  gap: 0.5rem;
  margin-bottom: 1rem;
}

.task-form textarea {
  grid-column: 1 / -1;
  min-height: 3rem;
}

.task-item {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  padding: 0.75rem 0;
  border-bottom: 1px solid #edf2f7;
}

.task-item__text {
  display: flex;
  flex-direction: column;
  flex: 1;
}

.task-item--done .task-item__title {
  text-decoration: line-through;
  color: #a0aec0;
}

.task-item__description {
  font-size: 0.875rem;
  color: #718096;
}

.task-item__delete {
  background: none;
  border: 1px solid #feb2b2;
  color: #c53030;
  border-radius: 4px;
  cursor: pointer;
}

.task-error {
  color: #c53030;
}

.task-empty {
  color: #718096;
}

@media (max-width: 640px) {
  .task-form {
    grid-template-columns: 1fr;
  }
}
";

const SHARES_CLIENT: &str = r#"export type Permission = 'view' | 'edit';

export interface Share {
  id: string;
  resourceId: string;
  ownerId: string;
  recipientEmail: string;
  permission: Permission;
  createdAt: string;
}

function headers(): HeadersInit {
  const token = localStorage.getItem('auth_token');
  return token
    ? { 'Content-Type': 'application/json', Authorization: `Bearer ${token}` }
    : { 'Content-Type': 'application/json' };
}

async function send<T>(path: string, init: RequestInit = {}): Promise<T> {
  let response: Response;
  try {
    response = await fetch(`/api/shares${path}`, { ...init, headers: headers() });
  } catch (err) {
    throw new Error('Unable to reach the server. Is the backend running?');
  }
  if (response.status === 204) {
    return undefined as T;
  }
  const payload = await response.json().catch(() => ({}));
  if (!response.ok) {
    throw new Error(payload.error ?? `Request failed with status ${response.status}`);
  }
  return payload as T;
}

export const sharesClient = {
  listFor(resourceId: string): Promise<Share[]> {
    return send<Share[]>(`?resourceId=${encodeURIComponent(resourceId)}`);
  },

  sharedWithMe(): Promise<Share[]> {
    return send<Share[]>('/incoming');
  },

  share(resourceId: string, recipientEmail: string, permission: Permission): Promise<Share> {
    return send<Share>('', {
      method: 'POST',
      body: JSON.stringify({ resourceId, recipientEmail, permission }),
    });
  },

  revoke(id: string): Promise<void> {
    return send<void>(`/${id}`, { method: 'DELETE' });
  },
};
"#;

const SHARE_DIALOG: &str = r#"import React, { useEffect, useState } from 'react';
import { Permission, Share, sharesClient } from '../api/sharesClient';
import '../styles/sharing.css';

export default function ShareDialog() {
  const [resourceId, setResourceId] = useState('');
  const [email, setEmail] = useState('');
  const [permission, setPermission] = useState<Permission>('view');
  const [shares, setShares] = useState<Share[]>([]);
  const [error, setError] = useState<string | null>(null);

  useEffect(() => {
    if (!resourceId) {
      setShares([]);
      return;
    }
    sharesClient
      .listFor(resourceId)
      .then(setShares)
      .catch((err) => setError(err instanceof Error ? err.message : 'Could not load shares'));
  }, [resourceId]);

  const handleShare = async (event: React.FormEvent<HTMLFormElement>) => {
    event.preventDefault();
    try {
      const created = await sharesClient.share(resourceId, email.trim(), permission);
      setShares((current) => [...current, created]);
      setEmail('');
      setError(null);
    } catch (err) {
      setError(err instanceof Error ? err.message : 'Could not share');
    }
  };

  const handleRevoke = async (share: Share) => {
    try {
      await sharesClient.revoke(share.id);
      setShares((current) => current.filter((s) => s.id !== share.id));
    } catch (err) {
      setError(err instanceof Error ? err.message : 'Could not revoke access');
    }
  };

  return (
    <section className="share-dialog">
      <h2>Share</h2>
      <form aria-label="Share a resource" onSubmit={handleShare}>
        <input
          aria-label="Resource id"
          name="resourceId"
          placeholder="Resource id"
          value={resourceId}
          onChange={(e) => setResourceId(e.target.value)}
          required
        />
        <input
          aria-label="Recipient email"
          name="email"
          type="email"
          placeholder="colleague@example.com"
          value={email}
          onChange={(e) => setEmail(e.target.value)}
          required
        />
        <select
          aria-label="Permission"
          name="permission"
          value={permission}
          onChange={(e) => setPermission(e.target.value as Permission)}
        >
          <option value="view">Can view</option>
          <option value="edit">Can edit</option>
        </select>
        <button type="submit" disabled={!resourceId || !email}>Share</button>
      </form>
      {error && <p className="share-error" role="alert">{error}</p>}
      <ul className="share-list">
        {shares.map((share) => (
          <li key={share.id}>
            <span>{share.recipientEmail}</span>
            <span className="share-permission">{share.permission}</span>
            <button type="button" onClick={() => handleRevoke(share)}>Revoke</button>
          </li>
        ))}
      </ul>
    </section>
  );
}
"#;

const SHARING_CSS: &str = r".share-dialog {
  max-width: 560px;
  margin: 2rem auto;
  padding: 1.5rem;
  border: 1px solid #e2e8f0;
  border-radius: 8px;
}

.share-dialog form {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
}

.share-dialog input {
  flex: 1;
  min-width: 160px;
}

.share-list {
  list-style: none;
  padding: 0;
  margin-top: 1rem;
}

.share-list li {
  display: flex;
  justify-content: space-between;
  gap: 0.5rem;
  padding: 0.5rem 0;
  border-bottom: 1px solid #edf2f7;
}

.share-permission {
  color: #718096;
  font-size: 0.875rem;
}

.share-error {
  color: #c53030;
}

@media (max-width: 640px) {
  .share-dialog form {
    flex-direction: column;
  }
}
";
