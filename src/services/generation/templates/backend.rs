//! Express and TypeScript server templates.
//!
//! Every route module default-exports its router so the assembled server
//! can mount it. Models keep their records in memory; the SQL migrations
//! describe the same tables for a real database.

use super::{FeatureName, Topic};
use crate::domain::models::GeneratedFile;

pub(super) fn files(topic: Topic, name: &FeatureName) -> Vec<GeneratedFile> {
    let files = match topic {
        Topic::Authentication => vec![
            ("src/models/User.ts", USER_MODEL),
            ("src/middleware/auth.ts", AUTH_MIDDLEWARE),
            ("src/controllers/authController.ts", AUTH_CONTROLLER),
            ("src/routes/auth.ts", AUTH_ROUTES),
            ("migrations/001_create_users.sql", USERS_MIGRATION),
        ],
        Topic::TaskManagement => vec![
            ("src/models/Task.ts", TASK_MODEL),
            ("src/controllers/taskController.ts", TASK_CONTROLLER),
            ("src/routes/tasks.ts", TASK_ROUTES),
            ("migrations/002_create_tasks.sql", TASKS_MIGRATION),
        ],
        Topic::Collaboration => vec![
            ("src/models/Share.ts", SHARE_MODEL),
            ("src/controllers/shareController.ts", SHARE_CONTROLLER),
            ("src/routes/shares.ts", SHARE_ROUTES),
            ("migrations/003_create_shares.sql", SHARES_MIGRATION),
        ],
        Topic::Api => vec![
            ("src/middleware/errorHandler.ts", ERROR_HANDLER),
            ("src/routes/health.ts", HEALTH_ROUTES),
        ],
        Topic::Data => vec![
            ("src/models/database.ts", DATABASE),
            ("migrations/000_initial_schema.sql", INITIAL_SCHEMA),
        ],
        Topic::Generic => return generic(name),
    };

    files
        .into_iter()
        .map(|(path, content)| GeneratedFile::classified(path, content))
        .collect()
}

fn generic(name: &FeatureName) -> Vec<GeneratedFile> {
    let camel = name.camel();
    let pascal = name.pascal();
    let kebab = name.kebab();

    let controller = format!(
        r"import {{ Request, Response }} from 'express';
import {{ randomUUID }} from 'crypto';

export interface {pascal}Record {{
  id: string;
  data: Record<string, unknown>;
  createdAt: string;
}}

const records = new Map<string, {pascal}Record>();

export function list{pascal}(_req: Request, res: Response): void {{
  res.json(Array.from(records.values()));
}}

export function get{pascal}(req: Request, res: Response): void {{
  const record = records.get(req.params.id);
  if (!record) {{
    res.status(404).json({{ error: '{kebab} not found' }});
    return;
  }}
  res.json(record);
}}

export function create{pascal}(req: Request, res: Response): void {{
  if (!req.body || typeof req.body !== 'object') {{
    res.status(400).json({{ error: 'Request body must be a JSON object' }});
    return;
  }}
  const record: {pascal}Record = {{
    id: randomUUID(),
    data: req.body,
    createdAt: new Date().toISOString(),
  }};
  records.set(record.id, record);
  res.status(201).json(record);
}}

export function delete{pascal}(req: Request, res: Response): void {{
  if (!records.delete(req.params.id)) {{
    res.status(404).json({{ error: '{kebab} not found' }});
    return;
  }}
  res.status(204).send();
}}
"
    );

    let routes = format!(
        r"import {{ Router }} from 'express';
import {{ create{pascal}, delete{pascal}, get{pascal}, list{pascal} }} from '../controllers/{camel}Controller';

const router = Router();

router.get('/', list{pascal});
router.get('/:id', get{pascal});
router.post('/', create{pascal});
router.delete('/:id', delete{pascal});

export default router;
"
    );

    vec![
        GeneratedFile::classified(format!("src/controllers/{camel}Controller.ts"), controller),
        GeneratedFile::classified(format!("src/routes/{kebab}.ts"), routes),
    ]
}

const USER_MODEL: &str = r"import { randomUUID } from 'crypto';

export interface User {
  id: string;
  name: string;
  email: string;
  passwordHash: string;
  createdAt: string;
}

export type PublicUser = Omit<User, 'passwordHash'>;

const users = new Map<string, User>();

export const UserModel = {
  findByEmail(email: string): User | undefined {
    const normalized = email.trim().toLowerCase();
    return Array.from(users.values()).find((user) => user.email === normalized);
  },

  findById(id: string): User | undefined {
    return users.get(id);
  },

  create(input: { name: string; email: string; passwordHash: string }): User {
    const user: User = {
      id: randomUUID(),
      name: input.name,
      email: input.email.trim().toLowerCase(),
      passwordHash: input.passwordHash,
      createdAt: new Date().toISOString(),
    };
    users.set(user.id, user);
    return user;
  },

  toPublic(user: User): PublicUser {
    const { passwordHash: _omitted, ...rest } = user;
    return rest;
  },
};
";

const AUTH_MIDDLEWARE: &str = r"import { NextFunction, Request, Response } from 'express';
import jwt from 'jsonwebtoken';

const JWT_SECRET = process.env.JWT_SECRET || 'change-me-in-production';
const TOKEN_TTL = process.env.JWT_EXPIRES_IN || '7d';

export interface AuthenticatedRequest extends Request {
  userId?: string;
}

export function signToken(userId: string): string {
  return jwt.sign({ sub: userId }, JWT_SECRET, { expiresIn: TOKEN_TTL } as jwt.SignOptions);
}

export function requireAuth(req: AuthenticatedRequest, res: Response, next: NextFunction): void {
  const header = req.header('authorization') ?? '';
  const [scheme, token] = header.split(' ');
  if (scheme !== 'Bearer' || !token) {
    res.status(401).json({ error: 'Authentication required' });
    return;
  }

  try {
    const payload = jwt.verify(token, JWT_SECRET) as jwt.JwtPayload;
    req.userId = String(payload.sub);
    next();
  } catch (err) {
    res.status(401).json({ error: 'Invalid or expired token' });
  }
}
";

const AUTH_CONTROLLER: &str = r"import { Request, Response } from 'express';
import bcrypt from 'bcryptjs';
import { UserModel } from '../models/User';
import { AuthenticatedRequest, signToken } from '../middleware/auth';

const EMAIL_PATTERN = /^[^\s@]+@[^\s@]+\.[^\s@]+$/;

export async function register(req: Request, res: Response): Promise<void> {
  const { name, email, password } = req.body ?? {};
  if (!name || !email || !password) {
    res.status(400).json({ error: 'name, email and password are required' });
    return;
  }
  if (!EMAIL_PATTERN.test(email)) {
    res.status(400).json({ error: 'email is not valid' });
    return;
  }
  if (String(password).length < 8) {
    res.status(400).json({ error: 'password must be at least 8 characters' });
    return;
  }
  if (UserModel.findByEmail(email)) {
    res.status(409).json({ error: 'an account with this email already exists' });
    return;
  }

  const passwordHash = await bcrypt.hash(password, 10);
  const user = UserModel.create({ name, email, passwordHash });
  res.status(201).json({ token: signToken(user.id), user: UserModel.toPublic(user) });
}

export async function login(req: Request, res: Response): Promise<void> {
  const { email, password } = req.body ?? {};
  const user = email ? UserModel.findByEmail(email) : undefined;
  const valid = user ? await bcrypt.compare(String(password ?? ''), user.passwordHash) : false;
  if (!user || !valid) {
    res.status(401).json({ error: 'Invalid email or password' });
    return;
  }
  res.json({ token: signToken(user.id), user: UserModel.toPublic(user) });
}

export function me(req: AuthenticatedRequest, res: Response): void {
  const user = req.userId ? UserModel.findById(req.userId) : undefined;
  if (!user) {
    res.status(404).json({ error: 'User not found' });
    return;
  }
  res.json(UserModel.toPublic(user));
}
";

const AUTH_ROUTES: &str = r"import { Router } from 'express';
import { login, me, register } from '../controllers/authController';
import { requireAuth } from '../middleware/auth';

const router = Router();

router.post('/register', register);
router.post('/login', login);
router.get('/me', requireAuth, me);

export default router;
";

const USERS_MIGRATION: &str = r"CREATE TABLE IF NOT EXISTS users (
  id UUID PRIMARY KEY,
  name VARCHAR(120) NOT NULL,
  email VARCHAR(255) NOT NULL UNIQUE,
  password_hash VARCHAR(255) NOT NULL,
  created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_users_email ON users (email);
";

const TASK_MODEL: &str = r"import { randomUUID } from 'crypto';

export type TaskStatus = 'todo' | 'in_progress' | 'done';

export const TASK_STATUSES: TaskStatus[] = ['todo', 'in_progress', 'done'];

export interface Task {
  id: string;
  ownerId: string;
  title: string;
  description: string;
  status: TaskStatus;
  dueDate: string | null;
  createdAt: string;
  updatedAt: string;
}

const tasks = new Map<string, Task>();

export const TaskModel = {
  listByOwner(ownerId: string, status?: TaskStatus): Task[] {
    return Array.from(tasks.values())
      .filter((task) => task.ownerId === ownerId && (!status || task.status === status))
      .sort((a, b) => b.createdAt.localeCompare(a.createdAt));
  },

  find(id: string): Task | undefined {
    return tasks.get(id);
  },

  create(ownerId: string, input: { title: string; description?: string; dueDate?: string | null }): Task {
    const now = new Date().toISOString();
    const task: Task = {
      id: randomUUID(),
      ownerId,
      title: input.title,
      description: input.description ?? '',
      status: 'todo',
      dueDate: input.dueDate ?? null,
      createdAt: now,
      updatedAt: now,
    };
    tasks.set(task.id, task);
    return task;
  },

  update(id: string, changes: Partial<Pick<Task, 'title' | 'description' | 'status' | 'dueDate'>>): Task | undefined {
    const existing = tasks.get(id);
    if (!existing) {
      return undefined;
    }
    const updated: Task = { ...existing, ...changes, updatedAt: new Date().toISOString() };
    tasks.set(id, updated);
    return updated;
  },

  remove(id: string): boolean {
    return tasks.delete(id);
  },
};
";

const TASK_CONTROLLER: &str = r"import { Request, Response } from 'express';
import { TASK_STATUSES, TaskModel, TaskStatus } from '../models/Task';

type OwnedRequest = Request & { userId?: string };

function ownerOf(req: OwnedRequest): string {
  return req.userId ?? req.header('x-user-id') ?? 'anonymous';
}

function isStatus(value: unknown): value is TaskStatus {
  return typeof value === 'string' && (TASK_STATUSES as string[]).includes(value);
}

export function listTasks(req: OwnedRequest, res: Response): void {
  const status = req.query.status;
  if (status !== undefined && !isStatus(status)) {
    res.status(400).json({ error: `status must be one of ${TASK_STATUSES.join(', ')}` });
    return;
  }
  res.json(TaskModel.listByOwner(ownerOf(req), status));
}

export function createTask(req: OwnedRequest, res: Response): void {
  const { title, description, dueDate } = req.body ?? {};
  if (typeof title !== 'string' || !title.trim()) {
    res.status(400).json({ error: 'title is required' });
    return;
  }
  const task = TaskModel.create(ownerOf(req), { title: title.trim(), description, dueDate });
  res.status(201).json(task);
}

export function updateTask(req: OwnedRequest, res: Response): void {
  const task = TaskModel.find(req.params.id);
  if (!task || task.ownerId !== ownerOf(req)) {
    res.status(404).json({ error: 'Task not found' });
    return;
  }
  const { title, description, status, dueDate } = req.body ?? {};
  if (status !== undefined && !isStatus(status)) {
    res.status(400).json({ error: `status must be one of ${TASK_STATUSES.join(', ')}` });
    return;
  }
  const updated = TaskModel.update(task.id, { title, description, status, dueDate });
  res.json(updated);
}

export function deleteTask(req: OwnedRequest, res: Response): void {
  const task = TaskModel.find(req.params.id);
  if (!task || task.ownerId !== ownerOf(req)) {
    res.status(404).json({ error: 'Task not found' });
    return;
  }
  TaskModel.remove(task.id);
  res.status(204).send();
}
";

const TASK_ROUTES: &str = r"import { Router } from 'express';
import { createTask, deleteTask, listTasks, updateTask } from '../controllers/taskController';

const router = Router();

router.get('/', listTasks);
router.post('/', createTask);
router.patch('/:id', updateTask);
router.delete('/:id', deleteTask);

export default router;
";

const TASKS_MIGRATION: &str = r"CREATE TABLE IF NOT EXISTS tasks (
  id UUID PRIMARY KEY,
  owner_id UUID NOT NULL,
  title VARCHAR(255) NOT NULL,
  description TEXT NOT NULL DEFAULT '',
  status VARCHAR(20) NOT NULL DEFAULT 'todo' CHECK (status IN ('todo', 'in_progress', 'done')),
  due_date DATE,
  created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
  updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_tasks_owner_status ON tasks (owner_id, status);
";

const SHARE_MODEL: &str = r"import { randomUUID } from 'crypto';

export type Permission = 'view' | 'edit';

export interface Share {
  id: string;
  resourceId: string;
  ownerId: string;
  recipientEmail: string;
  permission: Permission;
  createdAt: string;
}

const shares = new Map<string, Share>();

export const ShareModel = {
  forResource(resourceId: string): Share[] {
    return Array.from(shares.values()).filter((share) => share.resourceId === resourceId);
  },

  forRecipient(email: string): Share[] {
    const normalized = email.trim().toLowerCase();
    return Array.from(shares.values()).filter((share) => share.recipientEmail === normalized);
  },

  find(id: string): Share | undefined {
    return shares.get(id);
  },

  create(input: Omit<Share, 'id' | 'createdAt'>): Share {
    const share: Share = {
      ...input,
      recipientEmail: input.recipientEmail.trim().toLowerCase(),
      id: randomUUID(),
      createdAt: new Date().toISOString(),
    };
    shares.set(share.id, share);
    return share;
  },

  remove(id: string): boolean {
    return shares.delete(id);
  },
};
";

const SHARE_CONTROLLER: &str = r"import { Request, Response } from 'express';
import { Permission, ShareModel } from '../models/Share';

type OwnedRequest = Request & { userId?: string };

const PERMISSIONS: Permission[] = ['view', 'edit'];

function ownerOf(req: OwnedRequest): string {
  return req.userId ?? req.header('x-user-id') ?? 'anonymous';
}

export function listShares(req: OwnedRequest, res: Response): void {
  const resourceId = req.query.resourceId;
  if (typeof resourceId !== 'string' || !resourceId) {
    res.status(400).json({ error: 'resourceId query parameter is required' });
    return;
  }
  res.json(ShareModel.forResource(resourceId));
}

export function incomingShares(req: OwnedRequest, res: Response): void {
  const email = req.header('x-user-email');
  if (!email) {
    res.status(400).json({ error: 'x-user-email header is required' });
    return;
  }
  res.json(ShareModel.forRecipient(email));
}

export function createShare(req: OwnedRequest, res: Response): void {
  const { resourceId, recipientEmail, permission } = req.body ?? {};
  if (!resourceId || !recipientEmail) {
    res.status(400).json({ error: 'resourceId and recipientEmail are required' });
    return;
  }
  if (!PERMISSIONS.includes(permission)) {
    res.status(400).json({ error: 'permission must be view or edit' });
    return;
  }
  const share = ShareModel.create({
    resourceId: String(resourceId),
    recipientEmail: String(recipientEmail),
    permission,
    ownerId: ownerOf(req),
  });
  res.status(201).json(share);
}

export function revokeShare(req: OwnedRequest, res: Response): void {
  const share = ShareModel.find(req.params.id);
  if (!share || share.ownerId !== ownerOf(req)) {
    res.status(404).json({ error: 'Share not found' });
    return;
  }
  ShareModel.remove(share.id);
  res.status(204).send();
}
";

const SHARE_ROUTES: &str = r"import { Router } from 'express';
import { createShare, incomingShares, listShares, revokeShare } from '../controllers/shareController';

const router = Router();

router.get('/', listShares);
router.get('/incoming', incomingShares);
router.post('/', createShare);
router.delete('/:id', revokeShare);

export default router;
";

const SHARES_MIGRATION: &str = r"CREATE TABLE IF NOT EXISTS shares (
  id UUID PRIMARY KEY,
  resource_id VARCHAR(255) NOT NULL,
  owner_id UUID NOT NULL,
  recipient_email VARCHAR(255) NOT NULL,
  permission VARCHAR(10) NOT NULL CHECK (permission IN ('view', 'edit')),
  created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
  UNIQUE (resource_id, recipient_email)
);

CREATE INDEX IF NOT EXISTS idx_shares_recipient ON shares (recipient_email);
";

const ERROR_HANDLER: &str = r"import { NextFunction, Request, Response } from 'express';

export class HttpError extends Error {
  constructor(public readonly status: number, message: string) {
    super(message);
  }
}

export function notFound(req: Request, res: Response): void {
  res.status(404).json({ error: `No route for ${req.method} ${req.path}` });
}

export function errorHandler(err: Error, _req: Request, res: Response, _next: NextFunction): void {
  const status = err instanceof HttpError ? err.status : 500;
  if (status >= 500) {
    console.error(err);
  }
  res.status(status).json({ error: status >= 500 ? 'Internal server error' : err.message });
}
";

const HEALTH_ROUTES: &str = r"import { Router } from 'express';

const router = Router();
const startedAt = Date.now();

router.get('/', (_req, res) => {
  res.json({
    status: 'ok',
    uptimeSeconds: Math.round((Date.now() - startedAt) / 1000),
  });
});

export default router;
";

const DATABASE: &str = r"import { Pool, QueryResultRow } from 'pg';

const pool = new Pool({
  connectionString: process.env.DATABASE_URL,
  max: Number(process.env.DATABASE_POOL_SIZE || 10),
});

export async function query<T extends QueryResultRow>(text: string, params: unknown[] = []): Promise<T[]> {
  const result = await pool.query<T>(text, params);
  return result.rows;
}

export async function checkConnection(): Promise<boolean> {
  try {
    await pool.query('SELECT 1');
    return true;
  } catch (err) {
    console.error('Database connection failed', err);
    return false;
  }
}

export async function closePool(): Promise<void> {
  await pool.end();
}
";

const INITIAL_SCHEMA: &str = r"CREATE EXTENSION IF NOT EXISTS pgcrypto;

CREATE TABLE IF NOT EXISTS schema_migrations (
  version VARCHAR(255) PRIMARY KEY,
  applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";
