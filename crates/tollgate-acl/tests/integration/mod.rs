mod allow;
mod listeners;
