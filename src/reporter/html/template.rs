//! Embedded presentation layer of the HTML report.
//!
//! The document carries the serialized report data exactly once (the
//! `reportData` script block); every view is derived from it client-side.
//! Static CSS and script sit inside `{% raw %}` blocks so the template
//! engine only ever substitutes `title`, `generated_at` and `data`.

pub(super) const REPORT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
{% raw %}
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: #f5f7fa; color: #333; line-height: 1.6; }
        .container { max-width: 1200px; margin: 0 auto; padding: 20px; }
        .header { text-align: center; margin-bottom: 30px; padding: 20px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; border-radius: 10px; }
        .header h1 { font-size: 2.5em; margin-bottom: 10px; }
        .generated-info { font-size: 1.1em; opacity: 0.9; }
        .summary-section { margin-bottom: 40px; }
        .summary-card { background: white; padding: 30px; border-radius: 15px; box-shadow: 0 10px 30px rgba(0,0,0,0.1); }
        .summary-card h2 { margin-bottom: 20px; color: #4a5568; font-size: 1.8em; }
        .summary-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; }
        .summary-item { text-align: center; padding: 20px; border-radius: 10px; }
        .summary-item.total { background: linear-gradient(135deg, #3182ce, #2c5aa0); color: white; }
        .summary-item.passed { background: linear-gradient(135deg, #38a169, #2f855a); color: white; }
        .summary-item.failed { background: linear-gradient(135deg, #e53e3e, #c53030); color: white; }
        .summary-item.skipped { background: linear-gradient(135deg, #ed8936, #dd6b20); color: white; }
        .summary-item.duration { background: linear-gradient(135deg, #805ad5, #6b46c1); color: white; }
        .summary-item.passrate { background: linear-gradient(135deg, #38b2ac, #319795); color: white; }
        .summary-value { font-size: 2.5em; font-weight: bold; margin-bottom: 5px; }
        .summary-label { font-size: 1.1em; opacity: 0.9; }
        .tests-section h2 { margin-bottom: 25px; color: #4a5568; font-size: 1.8em; }
        .test-card { background: white; margin-bottom: 20px; border-radius: 15px; overflow: hidden; box-shadow: 0 5px 15px rgba(0,0,0,0.08); }
        .test-header { padding: 20px; cursor: pointer; display: flex; align-items: center; }
        .test-header.passed { border-left: 5px solid #38a169; background: linear-gradient(90deg, #f0fff4, #ffffff); }
        .test-header.failed { border-left: 5px solid #e53e3e; background: linear-gradient(90deg, #fed7d7, #ffffff); }
        .test-header.skipped { border-left: 5px solid #ed8936; background: linear-gradient(90deg, #feebc8, #ffffff); }
        .test-header.running { border-left: 5px solid #3182ce; background: linear-gradient(90deg, #bee3f8, #ffffff); }
        .test-info { flex: 1; }
        .test-name { font-size: 1.3em; font-weight: 600; margin-bottom: 5px; }
        .test-meta { color: #666; font-size: 0.95em; }
        .test-status { font-size: 1.5em; margin-left: 20px; }
        .still-running { color: #2c5aa0; font-weight: 600; }
        .test-details { padding: 0 20px 20px 20px; display: none; }
        .test-details.expanded { display: block; }
        .request-response { margin-top: 15px; }
        .http-section { margin-bottom: 20px; }
        .http-section h4 { margin-bottom: 10px; color: #4a5568; }
        .code-block { background: #f7fafc; border: 1px solid #e2e8f0; border-radius: 8px; padding: 15px; font-family: 'Courier New', monospace; font-size: 0.9em; overflow-x: auto; white-space: pre-wrap; }
        .error-section { background: #fed7d7; border: 1px solid #feb2b2; border-radius: 8px; padding: 15px; margin-top: 15px; }
        .error-message { color: #c53030; font-weight: 600; margin-bottom: 10px; }
        .stack-trace { color: #744210; font-family: 'Courier New', monospace; font-size: 0.85em; white-space: pre-wrap; }
        .method-badge { display: inline-block; padding: 4px 8px; border-radius: 4px; font-size: 0.8em; font-weight: bold; margin-right: 10px; color: white; }
        .method-GET { background: #38a169; }
        .method-HEAD { background: #319795; }
        .method-POST { background: #3182ce; }
        .method-PUT { background: #ed8936; }
        .method-PATCH { background: #805ad5; }
        .method-DELETE { background: #e53e3e; }
        .method-OPTIONS { background: #718096; }
        .status-badge { display: inline-block; padding: 4px 8px; border-radius: 4px; font-size: 0.8em; font-weight: bold; color: white; }
        .status-2xx { background: #38a169; }
        .status-4xx { background: #ed8936; }
        .status-5xx { background: #e53e3e; }
        .status-other { background: #718096; }
        .status-pending { background: #a0aec0; }
        .response-time { float: right; color: #666; }
{% endraw %}
    </style>
</head>
<body>
    <div class="container">
        <header class="header">
            <h1>{{ title }}</h1>
            <div class="generated-info">Generated on: <span id="generatedAt">{{ generated_at }}</span></div>
        </header>

        <div class="summary-section">
            <div class="summary-card">
                <h2>Test Summary</h2>
                <div class="summary-grid" id="summaryGrid"></div>
            </div>
        </div>

        <div class="tests-section">
            <h2>Test Details</h2>
            <div id="testDetails"></div>
        </div>
    </div>

    <script>
        const reportData = {{ data }};
    </script>
    <script>
{% raw %}
        function escapeHtml(value) {
            return String(value)
                .replace(/&/g, '&amp;')
                .replace(/</g, '&lt;')
                .replace(/>/g, '&gt;')
                .replace(/"/g, '&quot;');
        }

        // Pretty-print when the body parses as JSON, otherwise show it raw.
        function formatBody(text) {
            if (!text) return '';
            try {
                return JSON.stringify(JSON.parse(text), null, 2);
            } catch (err) {
                return text;
            }
        }

        function statusIcon(status) {
            switch (status) {
                case 'passed': return '✅';
                case 'failed': return '❌';
                case 'skipped': return '⏭️';
                case 'running': return '⏳';
            }
            return '⚠️';
        }

        function httpStatusClass(code) {
            if (code >= 200 && code < 300) return 'status-2xx';
            if (code >= 400 && code < 500) return 'status-4xx';
            if (code >= 500 && code < 600) return 'status-5xx';
            return 'status-other';
        }

        function initializeReport() {
            document.getElementById('generatedAt').textContent =
                new Date(reportData.generatedAt).toLocaleString();

            const summary = reportData.summary;
            document.getElementById('summaryGrid').innerHTML = `
                <div class="summary-item total">
                    <div class="summary-value">${summary.totalTests}</div>
                    <div class="summary-label">Total Tests</div>
                </div>
                <div class="summary-item passed">
                    <div class="summary-value">${summary.passed}</div>
                    <div class="summary-label">Passed</div>
                </div>
                <div class="summary-item failed">
                    <div class="summary-value">${summary.failed}</div>
                    <div class="summary-label">Failed</div>
                </div>
                <div class="summary-item skipped">
                    <div class="summary-value">${summary.skipped}</div>
                    <div class="summary-label">Skipped</div>
                </div>
                <div class="summary-item duration">
                    <div class="summary-value">${Math.round(summary.totalDurationMs)}ms</div>
                    <div class="summary-label">Total Duration</div>
                </div>
                <div class="summary-item passrate">
                    <div class="summary-value">${summary.passRate.toFixed(1)}%</div>
                    <div class="summary-label">Pass Rate</div>
                </div>
            `;

            document.getElementById('testDetails').innerHTML =
                reportData.tests.map(test => generateTestHtml(test)).join('');
        }

        function generateTestHtml(test) {
            const duration = test.durationMs != null
                ? Math.round(test.durationMs) + 'ms'
                : '<span class="still-running">still running</span>';
            return `
                <div class="test-card">
                    <div class="test-header ${test.status}" onclick="toggleTestDetails('${test.id}')">
                        <div class="test-info">
                            <div class="test-name">${escapeHtml(test.name)}</div>
                            <div class="test-meta">
                                Duration: ${duration} |
                                Requests: ${test.telemetry.length} |
                                Started: ${new Date(test.startedAt).toLocaleTimeString()}
                            </div>
                        </div>
                        <div class="test-status" title="${test.status}">${statusIcon(test.status)}</div>
                    </div>
                    <div class="test-details" id="details-${test.id}">
                        ${test.description ? `<p><strong>Description:</strong> ${escapeHtml(test.description)}</p>` : ''}
                        ${test.telemetry.map(entry => generateRequestHtml(entry)).join('')}
                        ${test.status === 'failed' && test.errorMessage ? `
                            <div class="error-section">
                                <div class="error-message">${escapeHtml(test.errorMessage)}</div>
                                ${test.stackTrace ? `<div class="stack-trace">${escapeHtml(test.stackTrace)}</div>` : ''}
                            </div>
                        ` : ''}
                    </div>
                </div>
            `;
        }

        function generateRequestHtml(entry) {
            const response = entry.response;
            const badge = response
                ? `<span class="status-badge ${httpStatusClass(response.statusCode)}">${response.statusCode} ${escapeHtml(response.statusText)}</span>
                   <span class="response-time">${Math.round(response.durationMs)}ms</span>`
                : `<span class="status-badge status-pending">pending</span>`;
            return `
                <div class="request-response">
                    <div class="http-section">
                        <h4>
                            <span class="method-badge method-${entry.method}">${entry.method}</span>
                            ${escapeHtml(entry.endpoint)}
                            ${badge}
                        </h4>
                        ${entry.requestBody ? `
                            <div>
                                <strong>Request Body:</strong>
                                <div class="code-block">${escapeHtml(formatBody(entry.requestBody))}</div>
                            </div>
                        ` : ''}
                        ${response ? `
                            <div>
                                <strong>Response Body:</strong>
                                <div class="code-block">${escapeHtml(formatBody(response.body))}</div>
                            </div>
                        ` : ''}
                    </div>
                </div>
            `;
        }

        function toggleTestDetails(id) {
            document.getElementById('details-' + id).classList.toggle('expanded');
        }

        document.addEventListener('DOMContentLoaded', initializeReport);
{% endraw %}
    </script>
</body>
</html>
"##;
