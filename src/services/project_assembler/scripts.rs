//! One-command launch scripts for two-bucket projects.

use super::{CLIENT_PORT, SERVER_PORT};

/// Title reduced to characters that are inert inside a quoted shell word.
fn shell_safe_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | ',' | ':' | '+') {
                c
            } else {
                ' '
            }
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn start_sh(title: &str) -> String {
    let title = shell_safe_title(title);
    format!(
        r#"#!/usr/bin/env bash
set -euo pipefail

cd "$(dirname "$0")"

echo 'Starting {title}'

if ! command -v node >/dev/null 2>&1; then
  echo "Node.js is required (https://nodejs.org)" >&2
  exit 1
fi

echo "Installing backend dependencies..."
npm install --prefix backend
echo "Installing frontend dependencies..."
npm install --prefix frontend

if [ -f backend/.env.example ] && [ ! -f backend/.env ]; then
  cp backend/.env.example backend/.env
fi

mkdir -p logs

npm run dev --prefix backend > logs/backend.log 2>&1 &
BACKEND_PID=$!
npm run dev --prefix frontend > logs/frontend.log 2>&1 &
FRONTEND_PID=$!

trap 'kill $BACKEND_PID $FRONTEND_PID 2>/dev/null' INT TERM EXIT

echo "Backend:  http://localhost:{SERVER_PORT} (logs/backend.log)"
echo "Frontend: http://localhost:{CLIENT_PORT} (logs/frontend.log)"

sleep 3
if command -v xdg-open >/dev/null 2>&1; then
  xdg-open "http://localhost:{CLIENT_PORT}" >/dev/null 2>&1 || true
elif command -v open >/dev/null 2>&1; then
  open "http://localhost:{CLIENT_PORT}" || true
fi

wait
"#
    )
}

/// Windows launcher, with CRLF line endings.
pub fn start_bat(title: &str) -> String {
    let title = title.replace(['&', '|', '<', '>', '^', '%'], " ");
    let script = format!(
        r#"@echo off
setlocal
cd /d "%~dp0"

echo Starting {title}

where node >nul 2>nul
if errorlevel 1 (
  echo Node.js is required ^(https://nodejs.org^)
  exit /b 1
)

echo Installing backend dependencies...
call npm install --prefix backend || exit /b 1
echo Installing frontend dependencies...
call npm install --prefix frontend || exit /b 1

if exist backend\.env.example if not exist backend\.env copy backend\.env.example backend\.env >nul

if not exist logs mkdir logs

start "backend" /b cmd /c "npm run dev --prefix backend > logs\backend.log 2>&1"
start "frontend" /b cmd /c "npm run dev --prefix frontend > logs\frontend.log 2>&1"

echo Backend:  http://localhost:{SERVER_PORT} (logs\backend.log)
echo Frontend: http://localhost:{CLIENT_PORT} (logs\frontend.log)

timeout /t 3 /nobreak >nul
start "" http://localhost:{CLIENT_PORT}

endlocal
"#
    );
    script.replace('\n', "\r\n")
}
