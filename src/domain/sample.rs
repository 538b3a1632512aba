// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

/// Built-in service agreement used by `plainterms sample`.
pub const SAMPLE_AGREEMENT: &str = r#"
    SERVICE AGREEMENT

    This Service Agreement ("Agreement") is entered into on [DATE] between Company XYZ ("Provider")
    and the Client ("Client").

    1. SERVICES
    Provider agrees to perform consulting services as described in Exhibit A. All services shall be
    performed in a professional and workmanlike manner in accordance with industry standards.

    2. PAYMENT TERMS
    Client agrees to pay Provider the fees set forth in Exhibit A. Payment is due within thirty (30)
    days of invoice date. Late payments may incur a fee of 1.5% per month.

    3. CONFIDENTIALITY
    Both parties acknowledge that they may have access to confidential information. Each party agrees
    to maintain the confidentiality of such information and not disclose it to third parties.

    4. LIMITATION OF LIABILITY
    Provider's liability shall not exceed the total amount paid by Client under this Agreement.
    Provider shall not be liable for any indirect, incidental, or consequential damages.

    5. GOVERNING LAW
    This Agreement shall be governed by the laws of [STATE]. Any disputes shall be resolved through
    binding arbitration.

    6. TERMINATION
    Either party may terminate this Agreement with thirty (30) days written notice.
"#;
