// Captured telegrams used across module tests

pub const TELEGRAM_V5: &str = concat!(
    "/ISk5\\2MT382-1000\r\n",
    "\r\n",
    "1-3:0.2.8(50)\r\n",
    "0-0:1.0.0(240301120005W)\r\n",
    "0-0:96.1.1(4B384547303034303436333935353037)\r\n",
    "1-0:1.8.1(001234.567*kWh)\r\n",
    "1-0:1.8.2(002345.678*kWh)\r\n",
    "1-0:2.8.1(000012.345*kWh)\r\n",
    "1-0:2.8.2(000023.456*kWh)\r\n",
    "0-0:96.14.0(0002)\r\n",
    "1-0:1.7.0(01.234*kW)\r\n",
    "1-0:2.7.0(00.000*kW)\r\n",
    "0-0:96.7.21(00004)\r\n",
    "0-0:96.7.9(00002)\r\n",
    "1-0:99.97.0(2)(0-0:96.7.19)(101208152415W)(0000000240*s)(101208151004W)(0000000301*s)\r\n",
    "1-0:32.32.0(00002)\r\n",
    "1-0:32.36.0(00000)\r\n",
    "0-0:96.13.0()\r\n",
    "1-0:32.7.0(230.1*V)\r\n",
    "1-0:31.7.0(005*A)\r\n",
    "1-0:21.7.0(01.234*kW)\r\n",
    "1-0:22.7.0(00.000*kW)\r\n",
    "0-1:24.1.0(003)\r\n",
    "0-1:96.1.0(3232323241424344313233343536373839)\r\n",
    "0-1:24.2.1(240301110000W)(00123.456*m3)\r\n",
    "!7BCF\r\n",
);

/// `TELEGRAM_V5` with the last checksum digit flipped.
pub const TELEGRAM_V5_BAD_CHECKSUM: &str = concat!(
    "/ISk5\\2MT382-1000\r\n",
    "\r\n",
    "1-3:0.2.8(50)\r\n",
    "0-0:1.0.0(240301120005W)\r\n",
    "0-0:96.1.1(4B384547303034303436333935353037)\r\n",
    "1-0:1.8.1(001234.567*kWh)\r\n",
    "1-0:1.8.2(002345.678*kWh)\r\n",
    "1-0:2.8.1(000012.345*kWh)\r\n",
    "1-0:2.8.2(000023.456*kWh)\r\n",
    "0-0:96.14.0(0002)\r\n",
    "1-0:1.7.0(01.234*kW)\r\n",
    "1-0:2.7.0(00.000*kW)\r\n",
    "0-0:96.7.21(00004)\r\n",
    "0-0:96.7.9(00002)\r\n",
    "1-0:99.97.0(2)(0-0:96.7.19)(101208152415W)(0000000240*s)(101208151004W)(0000000301*s)\r\n",
    "1-0:32.32.0(00002)\r\n",
    "1-0:32.36.0(00000)\r\n",
    "0-0:96.13.0()\r\n",
    "1-0:32.7.0(230.1*V)\r\n",
    "1-0:31.7.0(005*A)\r\n",
    "1-0:21.7.0(01.234*kW)\r\n",
    "1-0:22.7.0(00.000*kW)\r\n",
    "0-1:24.1.0(003)\r\n",
    "0-1:96.1.0(3232323241424344313233343536373839)\r\n",
    "0-1:24.2.1(240301110000W)(00123.456*m3)\r\n",
    "!7BCE\r\n",
);

pub const TELEGRAM_V2_2: &str = concat!(
    "/ISk5\\2ME382-1004\r\n",
    "\r\n",
    "0-0:96.1.1(4B414C37303035313139333631343132)\r\n",
    "1-0:1.8.1(00185.000*kWh)\r\n",
    "1-0:1.8.2(00084.000*kWh)\r\n",
    "1-0:2.8.1(00000.000*kWh)\r\n",
    "1-0:2.8.2(00000.000*kWh)\r\n",
    "0-0:96.14.0(0001)\r\n",
    "1-0:1.7.0(0000.96*kW)\r\n",
    "1-0:2.7.0(0000.00*kW)\r\n",
    "0-0:17.0.0(999*A)\r\n",
    "0-0:96.3.10(1)\r\n",
    "0-0:96.13.1()\r\n",
    "0-0:96.13.0()\r\n",
    "0-1:24.1.0(3)\r\n",
    "0-1:96.1.0(3238313031453631373038313634303132)\r\n",
    "0-1:24.3.0(120517020000)(08)(60)(1)(0-1:24.2.1)(m3)\r\n",
    "(00124.477)\r\n",
    "0-1:24.4.0(1)\r\n",
    "!\r\n",
);
