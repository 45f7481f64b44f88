mod guild_config;
